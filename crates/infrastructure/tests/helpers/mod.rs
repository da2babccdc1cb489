pub mod dns_server_mock;
pub mod mock_upstream;
pub mod zone;

pub use dns_server_mock::{MockDnsServer, MockReply};
pub use mock_upstream::MockUpstreamResolver;
pub use zone::{zone_file, SAMPLE_ZONE};
