use async_trait::async_trait;
use stackdns_domain::{DomainError, RecordData, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRecord {
    pub data: RecordData,
    pub ttl: u32,
}

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Resolves `domain` (no trailing dot) for `record_type`. A name that does
    /// not exist yields an empty list; timeouts and upstream failures are errors.
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<UpstreamRecord>, DomainError>;
}
