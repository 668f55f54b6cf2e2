use crate::application::dispatch::Dispatcher;
use std::sync::Arc;

pub(crate) struct ServerState {
    dispatcher: Arc<Dispatcher>,
}

impl ServerState {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
