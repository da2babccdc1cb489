use crate::ports::{DnsModule, DnsResponse};
use stackdns_domain::{DnsMessage, DomainError};
use std::sync::Arc;
use tracing::debug;

/// Drives one decoded request through the module chain in registration order.
pub struct ProcessDnsRequestUseCase {
    modules: Vec<Arc<dyn DnsModule>>,
}

impl ProcessDnsRequestUseCase {
    pub fn new(modules: Vec<Arc<dyn DnsModule>>) -> Self {
        Self { modules }
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Runs the modules until one dispatches the response or all have run. The
    /// returned response is always dispatched.
    pub async fn execute(&self, request: &DnsMessage) -> Result<DnsResponse, DomainError> {
        let mut response = DnsResponse::new();

        for module in &self.modules {
            module.process(request, &mut response).await?;

            if response.is_dispatched() {
                debug!(id = request.id(), module = module.name(), "Response dispatched early");
                return Ok(response);
            }
        }

        response.dispatch();
        Ok(response)
    }
}
