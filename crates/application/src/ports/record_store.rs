use async_trait::async_trait;
use stackdns_domain::{DomainError, Question, ResourceRecord};

/// A source of answers for a single question.
///
/// An empty list means "no answer here" and is not an error; errors are
/// reserved for a store that could not look the question up at all.
#[async_trait]
pub trait RecordStore: Send + Sync {
    fn name(&self) -> &str;

    async fn get_answer(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError>;
}
