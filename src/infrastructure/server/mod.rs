mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;
pub use router::app;

use crate::application::dispatch::Dispatcher;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve(dispatcher: Arc<Dispatcher>, addr: SocketAddr) -> Result<(), ServerError> {
    router::serve(dispatcher, addr).await
}
