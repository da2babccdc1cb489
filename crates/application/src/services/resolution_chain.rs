use crate::ports::{RecordStore, ResolverFactory};
use async_trait::async_trait;
use stackdns_domain::{DomainError, Question, ResourceRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered record stores; the first non-empty answer wins.
///
/// A failing store counts as "no answer" and the next one is asked. With
/// `escalate_unsupported`, an [`DomainError::UnsupportedType`] from any store
/// ends the lookup and is returned to the caller instead.
#[derive(Clone)]
pub struct ResolutionChain {
    stores: Vec<Arc<dyn RecordStore>>,
    escalate_unsupported: bool,
}

impl ResolutionChain {
    pub fn new(stores: Vec<Arc<dyn RecordStore>>) -> Self {
        Self {
            stores,
            escalate_unsupported: false,
        }
    }

    pub fn from_factory(factory: &dyn ResolverFactory) -> Result<Self, DomainError> {
        let stores = factory.create_stores()?;
        debug!(
            factory = factory.identifier(),
            stores = ?stores.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            "Resolution chain built"
        );
        Ok(Self::new(stores))
    }

    pub fn escalate_unsupported(mut self, escalate: bool) -> Self {
        self.escalate_unsupported = escalate;
        self
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn store_names(&self) -> Vec<&str> {
        self.stores.iter().map(|s| s.name()).collect()
    }

    pub async fn get_answer(
        &self,
        question: &Question,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        for store in &self.stores {
            match store.get_answer(question).await {
                Ok(records) if !records.is_empty() => {
                    debug!(
                        store = store.name(),
                        domain = %question.name,
                        answers = records.len(),
                        "Answered"
                    );
                    return Ok(records);
                }
                Ok(_) => {
                    debug!(store = store.name(), domain = %question.name, "No answer, trying next store");
                }
                Err(e @ DomainError::UnsupportedType(_)) if self.escalate_unsupported => {
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        store = store.name(),
                        domain = %question.name,
                        error = %e,
                        "Record store failed, trying next store"
                    );
                }
            }
        }

        Ok(Vec::new())
    }
}

#[async_trait]
impl RecordStore for ResolutionChain {
    fn name(&self) -> &str {
        "chain"
    }

    async fn get_answer(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        ResolutionChain::get_answer(self, question).await
    }
}
