#![allow(dead_code)]

use async_trait::async_trait;
use stackdns_application::ports::{DnsModule, DnsResponse};
use stackdns_domain::{DnsMessage, DomainError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Appends a fixed body and optionally dispatches or fails.
pub struct MockModule {
    name: String,
    body: Vec<u8>,
    dispatch: bool,
    error: Option<DomainError>,
    calls: Arc<AtomicUsize>,
}

impl MockModule {
    pub fn new(name: &str, body: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            body: body.to_vec(),
            dispatch: false,
            error: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn dispatching(mut self) -> Self {
        self.dispatch = true;
        self
    }

    pub fn failing(mut self, error: DomainError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DnsModule for MockModule {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(
        &self,
        _request: &DnsMessage,
        response: &mut DnsResponse,
    ) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        response.append_body(&self.body);
        if self.dispatch {
            response.dispatch();
        }
        Ok(())
    }
}

pub fn call_count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
