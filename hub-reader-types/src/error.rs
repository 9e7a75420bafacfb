use thiserror::Error;

/// Type alias of the [`Result`] type specific to `hub-reader`.
pub type HubResult<T, E> = std::result::Result<T, HubErr<E>>;

#[derive(Error, Debug)]
/// Common errors that may occur while talking to an event hub.
pub enum HubErr<E: std::error::Error> {
    #[error("Connection Error: {0}")]
    Connect(String),
    #[error("ConnectionStringErr {0}")]
    ConnectionStringErr(#[from] ConnectionStringErr),
    #[error("HubNameErr {0}")]
    HubNameErr(#[from] HubNameErr),
    #[error("Event hub name is not set and the connection string has no EntityPath")]
    HubNameNotSet,
    #[error("Session has already been closed")]
    SessionClosed,
    #[error("IO Error: {0}")]
    Io(#[source] std::io::Error),
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
    #[error("Backend error: {0}")]
    Backend(E),
    #[error("Runtime error: {0}")]
    Runtime(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that may happen when parsing a connection string
pub enum ConnectionStringErr {
    #[error("Connection string is empty")]
    Empty,
    #[error("Malformed segment `{0}`: expected `key=value`")]
    MalformedSegment(String),
    #[error("Unknown key `{0}`")]
    UnknownKey(String),
    #[error("Endpoint is required")]
    EndpointRequired,
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Either SharedAccessKeyName and SharedAccessKey, or SharedAccessSignature is required")]
    CredentialRequired,
    #[error("HubNameErr {0}")]
    HubNameErr(#[from] HubNameErr),
    #[error("Expected at most one event hub in the connection string")]
    NotOneHub,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Errors that may happen when handling HubName
pub enum HubNameErr {
    #[error("Invalid event hub name: valid pattern is [a-zA-Z0-9._-]{{1, 256}}")]
    InvalidHubName,
}

/// Function to construct a [`HubErr::Runtime`] error variant.
pub fn runtime_error<T: std::error::Error, E: std::error::Error + Send + Sync + 'static>(
    e: E,
) -> HubErr<T> {
    HubErr::Runtime(Box::new(e))
}
