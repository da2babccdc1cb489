mod dns_module;
mod record_store;
mod resolver_factory;
mod upstream_resolver;

pub use dns_module::{DnsModule, DnsResponse, ResponseState};
pub use record_store::RecordStore;
pub use resolver_factory::ResolverFactory;
pub use upstream_resolver::{UpstreamRecord, UpstreamResolver};
