use stackdns_application::modules::CoreModule;
use stackdns_application::ports::DnsModule;
use stackdns_application::use_cases::ProcessDnsRequestUseCase;
use stackdns_domain::Config;
use stackdns_infrastructure::dns::{resolver_factory, DnsServerHandler};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Builds the provider chain and module pipeline. Any store that fails to
    /// construct stops startup.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let factory = resolver_factory(config.dns.resolver_factory.as_deref(), &config.dns)?;
        let core = CoreModule::from_factory(factory.as_ref(), config.dns.escalate_unsupported)?;

        info!(
            factory = factory.identifier(),
            stores = ?core.chain().store_names(),
            "Resolution chain ready"
        );

        let modules: Vec<Arc<dyn DnsModule>> = vec![Arc::new(core)];
        let use_case = Arc::new(ProcessDnsRequestUseCase::new(modules));

        let handler = DnsServerHandler::new(use_case)
            .with_formerr_on_malformed(config.dns.formerr_on_malformed)
            .with_max_udp_payload(usize::from(config.server.max_udp_payload));

        Ok(Self { handler })
    }
}
