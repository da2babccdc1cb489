mod factory;
mod json_storage;
mod recursive;

pub use factory::{
    resolver_factory, RecursiveResolverFactory, StandardResolverFactory, StaticResolverFactory,
};
pub use json_storage::JsonStorageProvider;
pub use recursive::RecursiveProvider;
