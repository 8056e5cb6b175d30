//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
///
/// The pool is created once in `main`; repositories receive clones of it.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
