use async_trait::async_trait;
use stackdns_domain::{DnsMessage, DomainError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseState {
    #[default]
    Pending,
    /// Terminal: the body is final and no further module runs.
    Dispatched,
}

/// Response under construction while a request moves through the modules.
#[derive(Debug, Default)]
pub struct DnsResponse {
    body: Vec<u8>,
    state: ResponseState,
}

impl DnsResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub fn dispatch(&mut self) {
        self.state = ResponseState::Dispatched;
    }

    pub fn is_dispatched(&self) -> bool {
        self.state == ResponseState::Dispatched
    }
}

#[async_trait]
pub trait DnsModule: Send + Sync {
    fn name(&self) -> &str;

    async fn process(
        &self,
        request: &DnsMessage,
        response: &mut DnsResponse,
    ) -> Result<(), DomainError>;
}
