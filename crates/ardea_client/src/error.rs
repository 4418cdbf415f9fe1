use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetsClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An HTTP error status, or a soft error the server reported inside a
    /// 200 body (`errorcode`/`message`).
    #[error("Server returned error {code}: {message}")]
    Server { code: u16, message: String },

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl AssetsClientError {
    /// True for the one error the request wrapper retries on.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { code: 401, .. })
    }
}

pub type Result<T> = std::result::Result<T, AssetsClientError>;
