#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// `cdn.example.net` CNAME followed by an A record for it.
    CnameThenA { address: Ipv4Addr, ttl: u32 },
    /// Header and question only, with this RCODE.
    Rcode(u8),
    /// Valid answer but with the transaction ID flipped.
    WrongId,
    /// Never replies.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (rcode, answers) = match reply {
            MockReply::Silent => return None,
            MockReply::Rcode(code) => (code, 0u16),
            MockReply::CnameThenA { .. } | MockReply::WrongId => (0, 2),
        };

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]);
        if matches!(reply, MockReply::WrongId) {
            response[0] ^= 0xFF;
        }

        response.push(0x81);
        response.push(0x80 | rcode);

        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&answers.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        // Question section is echoed; the query carries nothing after it.
        response.extend_from_slice(&query[12..]);

        if answers > 0 {
            let (address, ttl) = match reply {
                MockReply::CnameThenA { address, ttl } => (address, ttl),
                _ => (Ipv4Addr::new(93, 184, 216, 34), 60),
            };
            let target = b"\x03cdn\x07example\x03net\x00";

            response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x05, 0x00, 0x01]);
            response.extend_from_slice(&ttl.to_be_bytes());
            response.extend_from_slice(&(target.len() as u16).to_be_bytes());
            let target_at = response.len() as u16;
            response.extend_from_slice(target);

            response.extend_from_slice(&(0xC000 | target_at).to_be_bytes());
            response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
            response.extend_from_slice(&ttl.to_be_bytes());
            response.extend_from_slice(&[0x00, 0x04]);
            response.extend_from_slice(&address.octets());
        }

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
