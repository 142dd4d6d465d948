#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch URL: {url} - {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("Fetch timeout for URL: {0}")]
    FetchTimeout(String),

    #[error("Upstream returned HTTP {status} for URL: {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No video id in embed URL: {0}")]
    MissingVideoId(String),

    #[error("Invalid payload encoding: {0}")]
    PayloadDecode(String),

    #[error("Decryption failed after {attempts} IV candidate(s)")]
    DecryptionFailed { attempts: usize },

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid key length: expected 16 bytes")]
    InvalidKeyLength,

    #[error("Invalid IV: {0}")]
    InvalidIv(String),
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::FetchTimeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::FetchFailed {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Self::PayloadDecode(e.to_string())
    }
}
