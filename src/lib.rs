pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::dispatch::Dispatcher;
pub use application::registry::{self, Registry};
pub use application::session::{BackendConnector, SessionError, SessionManager};
pub use domain::types;
pub use infrastructure::backend::{HttpConnector, SessionHandle};
pub use infrastructure::server;
