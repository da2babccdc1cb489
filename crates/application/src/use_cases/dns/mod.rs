mod process_dns_request;

pub use process_dns_request::ProcessDnsRequestUseCase;
