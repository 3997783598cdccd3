//! The storage session seam and its scoped guard

use std::ops::{Deref, DerefMut};

use super::errors::EngineResult;
use super::relation::{ColumnDef, RelationHandle};
use super::result::ResultSet;
use super::value::Value;
use crate::observability::{log_event_with_fields, Event, Logger};

/// One logical connection to a storage engine.
///
/// Everything a session creates is scoped to it: closing the session
/// discards every relation created through `create_session_relation`.
pub trait Session {
    /// Short backend name for logs and reports
    fn backend(&self) -> &'static str;

    /// Create a temporary relation with the given columns
    fn create_session_relation(
        &mut self,
        name: &str,
        columns: &[ColumnDef],
    ) -> EngineResult<RelationHandle>;

    /// Insert rows, each ordered as `column_names`. Returns rows inserted.
    fn insert_rows(
        &mut self,
        relation: &RelationHandle,
        column_names: &[String],
        rows: &[Vec<Value>],
    ) -> EngineResult<usize>;

    /// Execute a SELECT and return every row
    fn query(&mut self, sql: &str) -> EngineResult<ResultSet>;

    /// Release the session. Calling it twice is a no-op.
    fn close(&mut self) -> EngineResult<()>;
}

/// Scoped ownership of a [`Session`].
///
/// `close` surfaces the close error to the caller. A guard dropped without
/// `close` (early return, `?`, panic unwind) still closes the session and
/// logs the outcome.
pub struct SessionGuard {
    session: Option<Box<dyn Session>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn Session>) -> Self {
        log_event_with_fields(Event::SessionOpened, &[("backend", session.backend())]);
        Self {
            session: Some(session),
        }
    }

    /// Close the session, returning any error from the backend
    pub fn close(mut self) -> EngineResult<()> {
        match self.session.take() {
            Some(mut session) => {
                let backend = session.backend();
                session.close()?;
                log_event_with_fields(Event::SessionClosed, &[("backend", backend)]);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Deref for SessionGuard {
    type Target = dyn Session;

    fn deref(&self) -> &Self::Target {
        match &self.session {
            Some(session) => session.as_ref(),
            None => unreachable!("session is only taken by close(self)"),
        }
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.session {
            Some(session) => session.as_mut(),
            None => unreachable!("session is only taken by close(self)"),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            let backend = session.backend();
            match session.close() {
                Ok(()) => Logger::warn(
                    "SESSION_CLOSED_ON_DROP",
                    &[("backend", backend)],
                ),
                Err(e) => Logger::error(
                    "SESSION_CLOSE_FAILED",
                    &[("backend", backend), ("reason", &e.to_string())],
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSession {
        closes: Rc<Cell<u32>>,
    }

    impl Session for CountingSession {
        fn backend(&self) -> &'static str {
            "counting"
        }

        fn create_session_relation(
            &mut self,
            name: &str,
            columns: &[ColumnDef],
        ) -> EngineResult<RelationHandle> {
            Ok(RelationHandle::new(name, columns.to_vec()))
        }

        fn insert_rows(
            &mut self,
            _relation: &RelationHandle,
            _column_names: &[String],
            rows: &[Vec<Value>],
        ) -> EngineResult<usize> {
            Ok(rows.len())
        }

        fn query(&mut self, _sql: &str) -> EngineResult<ResultSet> {
            Ok(ResultSet::empty())
        }

        fn close(&mut self) -> EngineResult<()> {
            self.closes.set(self.closes.get() + 1);
            Ok(())
        }
    }

    fn guard() -> (SessionGuard, Rc<Cell<u32>>) {
        let closes = Rc::new(Cell::new(0));
        let session = CountingSession {
            closes: Rc::clone(&closes),
        };
        (SessionGuard::new(Box::new(session)), closes)
    }

    #[test]
    fn test_explicit_close_closes_once() {
        let (guard, closes) = guard();
        guard.close().unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_drop_closes() {
        let (guard, closes) = guard();
        drop(guard);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_early_return_closes() {
        fn failing(mut guard: SessionGuard) -> EngineResult<()> {
            guard.query("SELECT * FROM x")?;
            Err(crate::engine::EngineError::SessionClosed)
        }

        let (guard, closes) = guard();
        assert!(failing(guard).is_err());
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_deref_reaches_session() {
        let (mut guard, _closes) = guard();
        assert_eq!(guard.backend(), "counting");
        assert!(guard.query("SELECT * FROM x").unwrap().is_empty());
        guard.close().unwrap();
    }
}
