//! Harness configuration
//!
//! Layered: defaults, then an optional JSON file, then command-line
//! overrides. Every field of the file is optional.
//!
//! ```json
//! { "rows": 5, "columns": 5, "dsn": "memory", "relation": "x",
//!   "seed": 42, "max_resamples": 32 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetShape;
use crate::engine::{is_identifier, Dsn};

use super::errors::{HarnessError, HarnessResult};

/// Default row and column count
pub const DEFAULT_DIMENSION: i64 = 5;
/// Default redraw budget per pair
pub const DEFAULT_MAX_RESAMPLES: u32 = 32;
/// Upper bound accepted for `max_resamples`
pub const MAX_RESAMPLES_LIMIT: u32 = 1024;

/// Harness run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Row count (must be positive)
    #[serde(default = "default_dimension")]
    pub rows: i64,

    /// Column count (must be positive)
    #[serde(default = "default_dimension")]
    pub columns: i64,

    /// Storage engine to target
    #[serde(default)]
    pub dsn: Dsn,

    /// Name of the session relation
    #[serde(default = "default_relation")]
    pub relation: String,

    /// Seed for column shuffles and the memory engine; drawn from the OS
    /// when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Redraws allowed per pair when a randomized fetch collides
    #[serde(default = "default_max_resamples")]
    pub max_resamples: u32,
}

fn default_dimension() -> i64 {
    DEFAULT_DIMENSION
}
fn default_relation() -> String {
    "x".to_string()
}
fn default_max_resamples() -> u32 {
    DEFAULT_MAX_RESAMPLES
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMENSION,
            columns: DEFAULT_DIMENSION,
            dsn: Dsn::default(),
            relation: default_relation(),
            seed: None,
            max_resamples: DEFAULT_MAX_RESAMPLES,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub dsn: Option<Dsn>,
    pub relation: Option<String>,
    pub seed: Option<u64>,
    pub max_resamples: Option<u32>,
}

impl HarnessConfig {
    /// Load configuration from a JSON file. The result is not validated;
    /// call [`HarnessConfig::validate`] after applying overrides.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HarnessError::config(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| HarnessError::config(format!("Invalid config JSON: {}", e)))
    }

    /// Apply command-line overrides on top of this layer
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(rows) = overrides.rows {
            self.rows = rows;
        }
        if let Some(columns) = overrides.columns {
            self.columns = columns;
        }
        if let Some(dsn) = overrides.dsn {
            self.dsn = dsn;
        }
        if let Some(relation) = overrides.relation {
            self.relation = relation;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(max_resamples) = overrides.max_resamples {
            self.max_resamples = max_resamples;
        }
        self
    }

    /// Validate everything except the shape.
    ///
    /// Shape problems are precondition errors and are reported by
    /// [`HarnessConfig::shape`].
    pub fn validate(&self) -> HarnessResult<()> {
        if self.relation.is_empty() {
            return Err(HarnessError::config("relation must not be empty"));
        }

        if !is_identifier(&self.relation) {
            return Err(HarnessError::config(format!(
                "Invalid relation name: '{}'. Expected [A-Za-z_][A-Za-z0-9_]*.",
                self.relation
            )));
        }

        if self.max_resamples > MAX_RESAMPLES_LIMIT {
            return Err(HarnessError::config(format!(
                "max_resamples must be <= {}, got {}",
                MAX_RESAMPLES_LIMIT, self.max_resamples
            )));
        }

        Ok(())
    }

    /// The validated dataset shape
    pub fn shape(&self) -> HarnessResult<DatasetShape> {
        Ok(DatasetShape::new(self.rows, self.columns)?)
    }
}
