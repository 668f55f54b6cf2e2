use crate::domain::types::{CredentialSummary, SessionCredential};
use crate::infrastructure::backend::SessionHandle;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no backend credentials supplied; call set_credentials or POST /auth first")]
    NoCredentials,
    #[error("backend rejected the supplied credentials: {0}")]
    AuthRejected(String),
    #[error("backend handshake failed: {0}")]
    Handshake(String),
}

/// Capability used to establish an authenticated backend session. Production
/// code plugs in the HTTP connector; tests inject counting or failing stubs.
#[async_trait]
pub trait BackendConnector: Send + Sync {
    async fn connect(&self, credential: &SessionCredential)
    -> Result<SessionHandle, SessionError>;
}

type AttemptOutcome = Option<Result<Arc<SessionHandle>, SessionError>>;

enum SessionState {
    Uninitialized {
        credential: Option<SessionCredential>,
    },
    Connecting {
        attempt: watch::Receiver<AttemptOutcome>,
        credential: SessionCredential,
    },
    Connected {
        handle: Arc<SessionHandle>,
        credential: SessionCredential,
    },
    Failed {
        credential: Option<SessionCredential>,
        last_error: SessionError,
    },
}

enum Plan {
    Wait(watch::Receiver<AttemptOutcome>),
    Lead(watch::Sender<AttemptOutcome>, SessionCredential),
}

/// Owns the one live backend session. All consumers reach the handle through
/// [`ensure_connected`](Self::ensure_connected), which coalesces concurrent
/// connection attempts into a single handshake and swaps the handle wholesale
/// when credentials are replaced. The state mutex is never held across await.
pub struct SessionManager {
    connector: Arc<dyn BackendConnector>,
    state: Mutex<SessionState>,
}

impl SessionManager {
    pub fn new(connector: Arc<dyn BackendConnector>, initial: Option<SessionCredential>) -> Self {
        Self {
            connector,
            state: Mutex::new(SessionState::Uninitialized {
                credential: initial,
            }),
        }
    }

    /// Returns the current handle, connecting first if necessary. Passing a
    /// credential that differs from the current one retires the old handle
    /// and performs a fresh handshake; in-flight calls keep the handle they
    /// captured. While an attempt is in flight, every caller awaits that one
    /// attempt and shares its outcome.
    pub async fn ensure_connected(
        &self,
        credential: Option<SessionCredential>,
    ) -> Result<Arc<SessionHandle>, SessionError> {
        let requested = credential;
        loop {
            let plan = {
                let mut state = self.state.lock().expect("session state lock");
                match &*state {
                    SessionState::Connected {
                        handle,
                        credential: current,
                    } => match &requested {
                        Some(new) if new != current => {
                            Self::begin_attempt(&mut state, new.clone())
                        }
                        _ => return Ok(handle.clone()),
                    },
                    SessionState::Connecting {
                        attempt,
                        credential,
                    } => {
                        if attempt.has_changed().is_err() && attempt.borrow().is_none() {
                            // The leading task vanished without reporting;
                            // take over the attempt.
                            let credential =
                                requested.clone().unwrap_or_else(|| credential.clone());
                            Self::begin_attempt(&mut state, credential)
                        } else {
                            Plan::Wait(attempt.clone())
                        }
                    }
                    SessionState::Uninitialized { credential: stored }
                    | SessionState::Failed {
                        credential: stored, ..
                    } => match requested.clone().or_else(|| stored.clone()) {
                        Some(credential) => Self::begin_attempt(&mut state, credential),
                        None => return Err(SessionError::NoCredentials),
                    },
                }
            };

            match plan {
                Plan::Lead(tx, credential) => return self.lead_attempt(tx, credential).await,
                Plan::Wait(rx) => match self.await_attempt(rx).await {
                    Some(outcome) if requested.is_none() => return outcome,
                    // Carrying a replacement credential, or the attempt was
                    // abandoned: re-inspect the settled state.
                    _ => {}
                },
            }
        }
    }

    /// Non-blocking state probe for health reporting.
    pub fn is_connected(&self) -> bool {
        matches!(
            &*self.state.lock().expect("session state lock"),
            SessionState::Connected { .. }
        )
    }

    /// The endpoint and default scope of the current credential, with the
    /// secret token withheld. `None` until any credential has been seen.
    pub fn credential_summary(&self) -> Option<CredentialSummary> {
        let state = self.state.lock().expect("session state lock");
        match &*state {
            SessionState::Uninitialized { credential }
            | SessionState::Failed { credential, .. } => {
                credential.as_ref().map(SessionCredential::summary)
            }
            SessionState::Connecting { credential, .. }
            | SessionState::Connected { credential, .. } => Some(credential.summary()),
        }
    }

    /// The failure recorded by the most recent attempt, if it failed.
    pub fn last_error(&self) -> Option<SessionError> {
        match &*self.state.lock().expect("session state lock") {
            SessionState::Failed { last_error, .. } => Some(last_error.clone()),
            _ => None,
        }
    }

    fn begin_attempt(state: &mut SessionState, credential: SessionCredential) -> Plan {
        let (tx, rx) = watch::channel(None);
        *state = SessionState::Connecting {
            attempt: rx,
            credential: credential.clone(),
        };
        Plan::Lead(tx, credential)
    }

    async fn lead_attempt(
        &self,
        tx: watch::Sender<AttemptOutcome>,
        credential: SessionCredential,
    ) -> Result<Arc<SessionHandle>, SessionError> {
        info!(endpoint = %credential.endpoint_url, "establishing backend session");
        let outcome = self.connector.connect(&credential).await.map(Arc::new);

        {
            let mut state = self.state.lock().expect("session state lock");
            *state = match &outcome {
                Ok(handle) => SessionState::Connected {
                    handle: handle.clone(),
                    credential: credential.clone(),
                },
                Err(error) => {
                    warn!(endpoint = %credential.endpoint_url, %error, "backend session attempt failed");
                    SessionState::Failed {
                        credential: Some(credential.clone()),
                        last_error: error.clone(),
                    }
                }
            };
        }

        let _ = tx.send(Some(outcome.clone()));
        outcome
    }

    /// Parks on the in-flight attempt's channel until its leader reports.
    /// Returns `None` when the channel closed without a report.
    async fn await_attempt(
        &self,
        mut rx: watch::Receiver<AttemptOutcome>,
    ) -> Option<Result<Arc<SessionHandle>, SessionError>> {
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return Some(outcome);
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }
}
