use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Malformed name: {0}")]
    MalformedName(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Upstream resolution failed: {0}")]
    UpstreamFailure(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

/// RCODE values used when an error is turned into a response.
pub mod rcode {
    pub const NOERROR: u8 = 0;
    pub const FORMERR: u8 = 1;
    pub const SERVFAIL: u8 = 2;
    pub const NXDOMAIN: u8 = 3;
    pub const NOTIMP: u8 = 4;
    pub const REFUSED: u8 = 5;
}

impl DomainError {
    /// True for errors caused by the bytes we were handed rather than by us.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedPacket(_) | DomainError::MalformedName(_)
        )
    }

    pub fn response_code(&self) -> u8 {
        match self {
            DomainError::MalformedPacket(_) | DomainError::MalformedName(_) => rcode::FORMERR,
            DomainError::UnsupportedType(_) => rcode::NOTIMP,
            _ => rcode::SERVFAIL,
        }
    }
}
