use super::{JsonStorageProvider, RecursiveProvider};
use crate::dns::upstream::UdpUpstreamResolver;
use stackdns_application::ports::{RecordStore, ResolverFactory};
use stackdns_domain::{DnsConfig, DomainError};
use std::sync::Arc;
use std::time::Duration;

pub const STANDARD: &str = "standard";
pub const STATIC: &str = "static";
pub const RECURSIVE: &str = "recursive";

/// Picks the factory for a configured identifier. No identifier means
/// recursive resolution only.
pub fn resolver_factory(
    identifier: Option<&str>,
    config: &DnsConfig,
) -> Result<Box<dyn ResolverFactory>, DomainError> {
    let config = config.clone();
    match identifier.map(str::trim) {
        None | Some(RECURSIVE) => Ok(Box::new(RecursiveResolverFactory::new(config))),
        Some(STANDARD) => Ok(Box::new(StandardResolverFactory::new(config))),
        Some(STATIC) => Ok(Box::new(StaticResolverFactory::new(config))),
        Some(other) => Err(DomainError::ConfigError(format!(
            "Unknown resolver factory '{}', expected one of: {}, {}, {}",
            other, STANDARD, STATIC, RECURSIVE
        ))),
    }
}

fn static_store(config: &DnsConfig) -> Result<Arc<dyn RecordStore>, DomainError> {
    let provider = JsonStorageProvider::from_file(&config.record_file, config.default_ttl)?;
    Ok(Arc::new(provider))
}

fn recursive_store(config: &DnsConfig) -> Result<Arc<dyn RecordStore>, DomainError> {
    let upstream = UdpUpstreamResolver::from_addresses(
        &config.upstream_servers,
        Duration::from_millis(config.query_timeout),
    )?;
    Ok(Arc::new(RecursiveProvider::new(Arc::new(upstream))))
}

/// Static zone file first, then upstream.
pub struct StandardResolverFactory {
    config: DnsConfig,
}

impl StandardResolverFactory {
    pub fn new(config: DnsConfig) -> Self {
        Self { config }
    }
}

impl ResolverFactory for StandardResolverFactory {
    fn identifier(&self) -> &str {
        STANDARD
    }

    fn create_stores(&self) -> Result<Vec<Arc<dyn RecordStore>>, DomainError> {
        Ok(vec![static_store(&self.config)?, recursive_store(&self.config)?])
    }
}

pub struct StaticResolverFactory {
    config: DnsConfig,
}

impl StaticResolverFactory {
    pub fn new(config: DnsConfig) -> Self {
        Self { config }
    }
}

impl ResolverFactory for StaticResolverFactory {
    fn identifier(&self) -> &str {
        STATIC
    }

    fn create_stores(&self) -> Result<Vec<Arc<dyn RecordStore>>, DomainError> {
        Ok(vec![static_store(&self.config)?])
    }
}

pub struct RecursiveResolverFactory {
    config: DnsConfig,
}

impl RecursiveResolverFactory {
    pub fn new(config: DnsConfig) -> Self {
        Self { config }
    }
}

impl ResolverFactory for RecursiveResolverFactory {
    fn identifier(&self) -> &str {
        RECURSIVE
    }

    fn create_stores(&self) -> Result<Vec<Arc<dyn RecordStore>>, DomainError> {
        Ok(vec![recursive_store(&self.config)?])
    }
}
