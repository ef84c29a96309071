use thiserror::Error;

/// Errors returned by the NewsAPI client.
#[derive(Debug, Error)]
pub enum NewsApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error envelope (`"status": "error"`).
    #[error("NewsAPI error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// HTTP 429: the account's request quota is exhausted.
    #[error("NewsAPI rate limit reached: {0}")]
    RateLimited(String),

    /// HTTP 5xx from the API.
    #[error("NewsAPI server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client was misconfigured (bad base URL, missing key).
    #[error("invalid NewsAPI client configuration: {0}")]
    Config(String),
}
