//! Data source names and session opening

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{EngineError, EngineResult};
use super::memory::MemorySession;
use super::session::{Session, SessionGuard};
use super::sqlite::SqliteSession;

/// Which storage engine a run targets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dsn {
    /// `memory` / `memory:`
    #[default]
    Memory,
    /// `sqlite::memory:`
    SqliteMemory,
    /// `sqlite:<path>`
    SqliteFile(PathBuf),
}

impl Dsn {
    /// Open a session for this DSN.
    ///
    /// `seed` drives the memory engine's row shuffles; SQLite ignores it.
    pub fn open(&self, seed: u64) -> EngineResult<SessionGuard> {
        let session: Box<dyn Session> = match self {
            Dsn::Memory => Box::new(MemorySession::open(seed)),
            Dsn::SqliteMemory => Box::new(SqliteSession::open_in_memory()?),
            Dsn::SqliteFile(path) => Box::new(SqliteSession::open(path)?),
        };
        Ok(SessionGuard::new(session))
    }

    /// Whether row shuffles are reproducible from the harness seed
    pub fn is_reproducible(&self) -> bool {
        matches!(self, Dsn::Memory)
    }
}

impl FromStr for Dsn {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "memory" | "memory:" => Ok(Dsn::Memory),
            "sqlite::memory:" => Ok(Dsn::SqliteMemory),
            _ => match s.strip_prefix("sqlite:") {
                Some(path) if !path.is_empty() => Ok(Dsn::SqliteFile(PathBuf::from(path))),
                _ => Err(EngineError::InvalidDsn(s.to_string())),
            },
        }
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dsn::Memory => write!(f, "memory"),
            Dsn::SqliteMemory => write!(f, "sqlite::memory:"),
            Dsn::SqliteFile(path) => write!(f, "sqlite:{}", path.display()),
        }
    }
}

impl Serialize for Dsn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dsn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
