pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod session;
pub mod stdio;
pub mod validate;
