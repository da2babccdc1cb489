use async_trait::async_trait;
use stackdns_application::ports::{RecordStore, UpstreamResolver};
use stackdns_domain::wire::trim_root;
use stackdns_domain::{DomainError, Question, RecordType, ResourceRecord};
use std::sync::Arc;
use tracing::debug;

/// Types the recursive provider will query upstream for.
pub const SUPPORTED_TYPES: [RecordType; 8] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::CNAME,
    RecordType::TXT,
    RecordType::MX,
    RecordType::NS,
    RecordType::SOA,
    RecordType::PTR,
];

/// Record store that asks an upstream resolver on every lookup. Keeps no
/// cache; TTLs are passed through as the upstream reported them.
pub struct RecursiveProvider {
    upstream: Arc<dyn UpstreamResolver>,
}

impl RecursiveProvider {
    pub fn new(upstream: Arc<dyn UpstreamResolver>) -> Self {
        Self { upstream }
    }

    pub fn supports(record_type: RecordType) -> bool {
        SUPPORTED_TYPES.contains(&record_type)
    }
}

#[async_trait]
impl RecordStore for RecursiveProvider {
    fn name(&self) -> &str {
        "recursive"
    }

    async fn get_answer(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        let record_type = question
            .record_type()
            .filter(|rt| Self::supports(*rt))
            .ok_or_else(|| DomainError::UnsupportedType(RecordType::describe(question.qtype)))?;

        let domain = trim_root(&question.name);
        let records = self.upstream.lookup(domain, record_type).await?;

        debug!(
            domain = %domain,
            record_type = %record_type,
            answers = records.len(),
            "Recursive lookup"
        );

        Ok(records
            .into_iter()
            .map(|record| ResourceRecord {
                name: question.name.clone(),
                rtype: question.qtype,
                class: question.qclass,
                ttl: record.ttl,
                data: record.data,
            })
            .collect())
    }
}
