use stackdns_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;

    info!(
        bind_address = %config.server.bind_address,
        dns_port = config.server.dns_port,
        workers = config.server.workers,
        resolver_factory = config.dns.resolver_factory.as_deref().unwrap_or("recursive"),
        "Configuration loaded"
    );
    Ok(config)
}
