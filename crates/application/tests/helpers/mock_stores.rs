#![allow(dead_code)]

use async_trait::async_trait;
use stackdns_application::ports::{RecordStore, ResolverFactory};
use stackdns_domain::{
    DomainError, Question, RecordData, RecordType, ResourceRecord, CLASS_IN,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared log of which stores were asked, in order.
pub type CallLog = Arc<RwLock<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(RwLock::new(Vec::new()))
}

#[derive(Clone)]
pub struct MockRecordStore {
    name: String,
    answers: Arc<RwLock<HashMap<String, Vec<ResourceRecord>>>>,
    error: Arc<RwLock<Option<DomainError>>>,
    log: CallLog,
}

impl MockRecordStore {
    pub fn new(name: &str, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            answers: Arc::new(RwLock::new(HashMap::new())),
            error: Arc::new(RwLock::new(None)),
            log,
        }
    }

    pub async fn set_answer(&self, domain: &str, records: Vec<ResourceRecord>) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), records);
    }

    pub async fn set_error(&self, error: DomainError) {
        *self.error.write().await = Some(error);
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_answer(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        self.log.write().await.push(self.name.clone());

        if let Some(error) = self.error.read().await.clone() {
            return Err(error);
        }

        Ok(self
            .answers
            .read()
            .await
            .get(&question.normalized_domain())
            .cloned()
            .unwrap_or_default())
    }
}

pub struct MockResolverFactory {
    stores: Vec<Arc<dyn RecordStore>>,
    fail: bool,
}

impl MockResolverFactory {
    pub fn new(stores: Vec<Arc<dyn RecordStore>>) -> Self {
        Self {
            stores,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            stores: Vec::new(),
            fail: true,
        }
    }
}

impl ResolverFactory for MockResolverFactory {
    fn identifier(&self) -> &str {
        "mock"
    }

    fn create_stores(&self) -> Result<Vec<Arc<dyn RecordStore>>, DomainError> {
        if self.fail {
            return Err(DomainError::ConfigError("mock factory failure".to_string()));
        }
        Ok(self.stores.clone())
    }
}

pub fn a_record(domain: &str, address: &str, ttl: u32) -> ResourceRecord {
    ResourceRecord::new(
        format!("{}.", domain),
        RecordType::A,
        CLASS_IN,
        ttl,
        RecordData::A(address.to_string()),
    )
}

pub fn question(domain: &str, record_type: RecordType) -> Question {
    Question::new(format!("{}.", domain), record_type, CLASS_IN)
}
