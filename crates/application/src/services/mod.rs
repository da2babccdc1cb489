mod resolution_chain;

pub use resolution_chain::ResolutionChain;
