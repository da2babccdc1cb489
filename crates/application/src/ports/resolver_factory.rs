use super::RecordStore;
use stackdns_domain::DomainError;
use std::sync::Arc;

/// Builds the ordered list of record stores a resolution chain consults.
pub trait ResolverFactory: Send + Sync {
    fn identifier(&self) -> &str;

    fn create_stores(&self) -> Result<Vec<Arc<dyn RecordStore>>, DomainError>;
}
