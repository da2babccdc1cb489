pub mod server;
pub mod storage;
pub mod transport;
pub mod upstream;

pub use server::DnsServerHandler;
pub use storage::{
    resolver_factory, JsonStorageProvider, RecursiveProvider, RecursiveResolverFactory,
    StandardResolverFactory, StaticResolverFactory,
};
pub use upstream::UdpUpstreamResolver;
