use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the provider client and the tool operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the provider.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("{0}")]
    Api(String),

    /// Provider answered with a payload we could not decode.
    #[error("{0}")]
    Parse(String),

    /// The ticker matched no entry in the provider's coin list.
    #[error("Cryptocurrency with symbol {0} not found")]
    SymbolNotFound(String),

    /// The coin resolved but the requested data was missing from the response.
    #[error("Price data for {0} not available")]
    DataUnavailable(String),

    /// MCP transport setup or shutdown failure.
    #[error("transport error: {0}")]
    Transport(String),
}
