use stackdns_application::use_cases::ProcessDnsRequestUseCase;
use stackdns_domain::errors::rcode;
use stackdns_domain::wire::decode_header;
use stackdns_domain::{DnsMessage, Header, RecordType, WireCodec};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Smallest payload every DNS client accepts over UDP (RFC 1035 §4.2.1).
pub const MIN_UDP_PAYLOAD: usize = 512;

/// Turns one inbound datagram into at most one outbound datagram.
///
/// Nothing on this path panics on hostile input: undecodable packets are
/// dropped or answered with FORMERR, pipeline failures become an error
/// RCODE, and oversize answers are truncated with TC set.
pub struct DnsServerHandler {
    use_case: Arc<ProcessDnsRequestUseCase>,
    codec: WireCodec,
    formerr_on_malformed: bool,
    max_udp_payload: usize,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ProcessDnsRequestUseCase>) -> Self {
        Self {
            use_case,
            codec: WireCodec::new(),
            formerr_on_malformed: true,
            max_udp_payload: MIN_UDP_PAYLOAD,
        }
    }

    pub fn with_formerr_on_malformed(mut self, enabled: bool) -> Self {
        self.formerr_on_malformed = enabled;
        self
    }

    pub fn with_max_udp_payload(mut self, size: usize) -> Self {
        self.max_udp_payload = size.max(MIN_UDP_PAYLOAD);
        self
    }

    pub async fn handle_datagram(&self, packet: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match self.codec.decode(packet) {
            Ok(request) => request,
            Err(e) => {
                debug!(client = %client, error = %e, bytes = packet.len(), "Malformed query");
                return self.formerr(packet);
            }
        };

        if request.flags().qr {
            debug!(client = %client, id = request.id(), "Ignoring datagram with QR set");
            return None;
        }

        if let Some(question) = request.question() {
            debug!(
                domain = %question.name,
                record_type = %RecordType::describe(question.qtype),
                client = %client,
                "DNS query received"
            );
        }

        let body = match self.use_case.execute(&request).await {
            Ok(response) => response.into_body(),
            Err(e) => {
                warn!(client = %client, id = request.id(), error = %e, "Query processing failed");
                return self.reply_with(&request, e.response_code(), false);
            }
        };

        if body.is_empty() {
            debug!(client = %client, id = request.id(), "Pipeline produced no response");
            return None;
        }

        let limit = self.udp_limit(&request);
        if body.len() > limit {
            debug!(client = %client, bytes = body.len(), limit, "Response truncated");
            let code = decode_header(&body)
                .map(|header| header.flags.rcode)
                .unwrap_or(rcode::NOERROR);
            return self.reply_with(&request, code, true);
        }

        Some(body)
    }

    /// Payload ceiling for this client: its EDNS0 size if advertised,
    /// otherwise the configured cap.
    fn udp_limit(&self, request: &DnsMessage) -> usize {
        request
            .edns_payload_size()
            .map(|size| (size as usize).max(MIN_UDP_PAYLOAD))
            .unwrap_or(self.max_udp_payload)
    }

    fn formerr(&self, packet: &[u8]) -> Option<Vec<u8>> {
        if !self.formerr_on_malformed {
            return None;
        }
        let header = decode_header(packet).ok()?;
        if header.flags.qr {
            return None;
        }

        let mut flags = header.flags;
        flags.qr = true;
        flags.ra = false;
        flags.tc = false;
        flags.rcode = rcode::FORMERR;

        let reply = DnsMessage {
            header: Header {
                id: header.id,
                flags,
                ..Header::default()
            },
            ..DnsMessage::default()
        };
        self.encode(&reply)
    }

    /// Header and question only, with the given RCODE.
    fn reply_with(&self, request: &DnsMessage, code: u8, truncated: bool) -> Option<Vec<u8>> {
        let mut header = request.header;
        header.flags.qr = true;
        header.flags.ra = false;
        header.flags.tc = truncated;
        header.flags.rcode = code;

        let mut reply = DnsMessage {
            header,
            questions: request.questions.clone(),
            ..DnsMessage::default()
        };
        reply.sync_counts();
        self.encode(&reply)
    }

    fn encode(&self, message: &DnsMessage) -> Option<Vec<u8>> {
        match self.codec.encode(message) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(id = message.id(), error = %e, "Failed to encode reply");
                None
            }
        }
    }
}
