use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Listener shutdown error: {0}")]
    Shutdown(String),
}
