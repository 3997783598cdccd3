//! Storage engine seam
//!
//! The harness talks to storage only through [`Session`]:
//!
//! - `create_session_relation(name, columns)` → [`RelationHandle`]
//! - `insert_rows(handle, column_names, rows)`
//! - `query(sql)` → [`ResultSet`]
//! - `close()`
//!
//! Sessions are opened from a [`Dsn`] and always held through a
//! [`SessionGuard`], which releases them on every exit path.
//!
//! # Backends
//!
//! - `memory`: in-process, seeded row shuffles ([`MemorySession`])
//! - `sqlite::memory:` / `sqlite:<path>`: SQLite temp tables ([`SqliteSession`])

mod dsn;
mod errors;
mod memory;
mod relation;
mod result;
mod session;
mod sql;
mod sqlite;
mod value;

pub use dsn::Dsn;
pub use errors::{EngineError, EngineResult};
pub use memory::MemorySession;
pub use relation::{is_identifier, quote_ident, ColumnDef, RelationHandle};
pub use result::{ResultSet, Row};
pub use session::{Session, SessionGuard};
pub use sql::{Projection, RowOrder, SelectStatement};
pub use sqlite::SqliteSession;
pub use value::{ColumnType, Value};
