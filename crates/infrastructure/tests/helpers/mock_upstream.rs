#![allow(dead_code)]
use async_trait::async_trait;
use stackdns_application::ports::{UpstreamRecord, UpstreamResolver};
use stackdns_domain::{DomainError, RecordType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Upstream resolver answering from a fixed table and recording lookups.
#[derive(Clone, Default)]
pub struct MockUpstreamResolver {
    answers: Arc<RwLock<HashMap<(String, RecordType), Vec<UpstreamRecord>>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    lookups: Arc<RwLock<Vec<(String, RecordType)>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_answer(
        &self,
        domain: &str,
        record_type: RecordType,
        records: Vec<UpstreamRecord>,
    ) {
        self.answers
            .write()
            .await
            .insert((domain.to_string(), record_type), records);
    }

    pub async fn set_error(&self, error: DomainError) {
        *self.error.write().await = Some(error);
    }

    pub async fn lookups(&self) -> Vec<(String, RecordType)> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<UpstreamRecord>, DomainError> {
        self.lookups
            .write()
            .await
            .push((domain.to_string(), record_type));

        if let Some(error) = self.error.read().await.clone() {
            return Err(error);
        }

        Ok(self
            .answers
            .read()
            .await
            .get(&(domain.to_string(), record_type))
            .cloned()
            .unwrap_or_default())
    }
}
