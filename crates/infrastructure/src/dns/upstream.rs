use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use stackdns_application::ports::{UpstreamRecord, UpstreamResolver};
use stackdns_domain::errors::rcode;
use stackdns_domain::wire::fqdn;
use stackdns_domain::{
    DnsMessage, DomainError, Flags, Header, Question, RecordType, WireCodec, CLASS_IN,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolves through a list of upstream servers, trying them in order until
/// one gives a usable answer.
///
/// NOERROR returns the answers of the requested type and NXDOMAIN returns an
/// empty list. Any other RCODE, a timeout or an undecodable reply moves on to
/// the next server.
pub struct UdpUpstreamResolver {
    transports: Vec<Arc<dyn DnsTransport>>,
    timeout: Duration,
    codec: WireCodec,
}

impl UdpUpstreamResolver {
    pub fn new(transports: Vec<Arc<dyn DnsTransport>>, timeout: Duration) -> Self {
        Self {
            transports,
            timeout,
            codec: WireCodec::new(),
        }
    }

    /// Builds one UDP transport per `IP:PORT` string.
    pub fn from_addresses(servers: &[String], timeout: Duration) -> Result<Self, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::ConfigError(
                "No upstream servers configured".to_string(),
            ));
        }

        let transports = servers
            .iter()
            .map(|server| {
                server
                    .parse::<SocketAddr>()
                    .map(|addr| Arc::new(UdpTransport::new(addr)) as Arc<dyn DnsTransport>)
                    .map_err(|e| {
                        DomainError::ConfigError(format!(
                            "Invalid upstream server '{}': {}",
                            server, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(transports, timeout))
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.transports.iter().map(|t| t.server_addr()).collect()
    }

    fn build_query(domain: &str, record_type: RecordType) -> DnsMessage {
        let mut query = DnsMessage {
            header: Header {
                id: fastrand::u16(..),
                flags: Flags::query(),
                ..Header::default()
            },
            questions: vec![Question::new(fqdn(domain), record_type, CLASS_IN)],
            ..DnsMessage::default()
        };
        query.sync_counts();
        query
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        query_bytes: &[u8],
        id: u16,
    ) -> Result<DnsMessage, DomainError> {
        let response = transport.send(query_bytes, self.timeout).await?;
        let reply = self.codec.decode(&response.bytes)?;

        if reply.id() != id || !reply.flags().qr {
            return Err(DomainError::UpstreamFailure(format!(
                "{} sent a reply that does not match query {}",
                transport.server_addr(),
                id
            )));
        }
        Ok(reply)
    }
}

#[async_trait]
impl UpstreamResolver for UdpUpstreamResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<UpstreamRecord>, DomainError> {
        let query = Self::build_query(domain, record_type);
        let query_bytes = self.codec.encode(&query)?;
        let mut last_error = None;

        for transport in &self.transports {
            let server = transport.server_addr();
            let reply = match self.exchange(transport.as_ref(), &query_bytes, query.id()).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(server = %server, domain = %domain, error = %e, "Upstream query failed");
                    last_error = Some(e);
                    continue;
                }
            };

            match reply.flags().rcode {
                rcode::NOERROR => {
                    let wanted = record_type.to_u16();
                    let records: Vec<UpstreamRecord> = reply
                        .answers
                        .into_iter()
                        .filter(|rr| rr.rtype == wanted)
                        .map(|rr| UpstreamRecord {
                            data: rr.data,
                            ttl: rr.ttl,
                        })
                        .collect();
                    debug!(
                        server = %server,
                        protocol = transport.protocol_name(),
                        domain = %domain,
                        record_type = %record_type,
                        answers = records.len(),
                        "Upstream answered"
                    );
                    return Ok(records);
                }
                rcode::NXDOMAIN => {
                    debug!(server = %server, domain = %domain, "Upstream reported NXDOMAIN");
                    return Ok(Vec::new());
                }
                code => {
                    warn!(server = %server, domain = %domain, rcode = code, "Upstream returned an error code");
                    last_error = Some(DomainError::UpstreamFailure(format!(
                        "{} answered with RCODE {}",
                        server, code
                    )));
                }
            }
        }

        Err(DomainError::UpstreamFailure(match last_error {
            Some(e) => format!(
                "All {} upstream servers failed for {} {}, last error: {}",
                self.transports.len(),
                domain,
                record_type,
                e
            ),
            None => format!("No upstream servers to query for {} {}", domain, record_type),
        }))
    }
}
