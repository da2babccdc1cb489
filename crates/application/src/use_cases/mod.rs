pub mod dns;

pub use dns::ProcessDnsRequestUseCase;
