use thiserror::Error;

/// Crate level error enum
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client could not be built
    #[error("couldn't build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Relay was built outside a Tokio runtime
    #[error("no Tokio runtime to run the relay worker on")]
    NoRuntime,

    /// The relay's background worker is no longer accepting payloads
    #[error("relay worker has shut down")]
    RelayClosed,
}

/// Crate level result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single transmission attempt.
///
/// Terminal for that one event only: it gets logged and discarded.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// DNS, connection, timeout or TLS failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("endpoint responded with status {0}")]
    Status(u16),

    /// No endpoint stored and no default configured
    #[error("no endpoint configured")]
    MissingEndpoint,

    /// Stored endpoint is not a valid URL
    #[error("invalid endpoint url {url:?}: {source}")]
    InvalidUrl {
        /// Offending value
        url: String,

        /// Parser error
        #[source]
        source: url::ParseError,
    },
}

impl TransmitError {
    /// Numeric HTTP status, if the endpoint answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            Self::MissingEndpoint | Self::InvalidUrl { .. } => None,
        }
    }

    /// Message followed by every underlying cause, joined with `": "`
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            let message = cause.to_string();

            if !report.ends_with(&message) {
                report.push_str(": ");
                report.push_str(&message);
            }

            source = cause.source();
        }

        report
    }
}
