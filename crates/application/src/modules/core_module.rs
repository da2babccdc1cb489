use crate::ports::{DnsModule, DnsResponse, ResolverFactory};
use crate::services::ResolutionChain;
use async_trait::async_trait;
use stackdns_domain::{DnsMessage, DomainError, ResourceRecord, WireCodec};
use tracing::debug;

/// Resolves the request's question through the chain and appends the encoded
/// response to the body. Runs exactly one resolve and one encode per request.
pub struct CoreModule {
    chain: ResolutionChain,
    codec: WireCodec,
}

impl CoreModule {
    pub fn new(chain: ResolutionChain) -> Self {
        Self {
            chain,
            codec: WireCodec::new(),
        }
    }

    pub fn from_factory(
        factory: &dyn ResolverFactory,
        escalate_unsupported: bool,
    ) -> Result<Self, DomainError> {
        let chain =
            ResolutionChain::from_factory(factory)?.escalate_unsupported(escalate_unsupported);
        Ok(Self::new(chain))
    }

    pub fn chain(&self) -> &ResolutionChain {
        &self.chain
    }

    /// Response shape: request flags with `qr=1, ra=0`, the request's question,
    /// `answers`, and the request's authority and additional sections as-is.
    pub fn build_response(request: &DnsMessage, answers: Vec<ResourceRecord>) -> DnsMessage {
        let mut header = request.header;
        header.flags.qr = true;
        header.flags.ra = false;

        let mut response = DnsMessage {
            header,
            questions: request.questions.clone(),
            answers,
            authority: request.authority.clone(),
            additional: request.additional.clone(),
        };
        response.sync_counts();
        response
    }
}

#[async_trait]
impl DnsModule for CoreModule {
    fn name(&self) -> &str {
        "core"
    }

    async fn process(
        &self,
        request: &DnsMessage,
        response: &mut DnsResponse,
    ) -> Result<(), DomainError> {
        let answers = match request.question() {
            Some(question) => self.chain.get_answer(question).await?,
            None => Vec::new(),
        };

        let reply = Self::build_response(request, answers);
        let bytes = self.codec.encode(&reply)?;
        debug!(
            id = reply.id(),
            answers = reply.answers.len(),
            bytes = bytes.len(),
            "Response encoded"
        );

        response.append_body(&bytes);
        Ok(())
    }
}
