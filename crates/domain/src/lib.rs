//! stackdns domain layer: record types, the DNS message model and its wire codec.
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig};
pub use dns_message::{normalize_domain, DnsMessage, Flags, Header, Question};
pub use dns_record::{OptData, RecordData, RecordType, ResourceRecord, SoaData, CLASS_IN};
pub use errors::DomainError;
pub use wire::WireCodec;
