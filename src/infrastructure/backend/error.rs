use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status} for {path}: {message}")]
    Status {
        status: u16,
        path: String,
        message: String,
    },
}
