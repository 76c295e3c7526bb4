#![allow(dead_code)]
use relay_dns_domain::{Answer, Message, Sections};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

#[derive(Clone)]
pub enum Behavior {
    /// A record per question from the zone; names not in the zone get none.
    Zone(HashMap<String, [u8; 4]>),
    /// Same reply bytes for every query.
    Fixed(Vec<u8>),
    /// Never reply.
    Silent,
}

/// Resolver on an ephemeral loopback port, answering from a [`Behavior`].
pub struct FakeResolver {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeResolver {
    pub async fn start(behavior: Behavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

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
                            log.lock().unwrap().push(buf[..len].to_vec());
                            if let Some(reply) = Self::build_reply(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn with_zone(records: &[(&str, [u8; 4])]) -> Self {
        let zone = records
            .iter()
            .map(|(name, ip)| (name.to_string(), *ip))
            .collect();
        Self::start(Behavior::Zone(zone)).await.unwrap()
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    fn build_reply(behavior: &Behavior, query: &[u8]) -> Option<Vec<u8>> {
        match behavior {
            Behavior::Silent => None,
            Behavior::Fixed(bytes) => Some(bytes.clone()),
            Behavior::Zone(zone) => {
                let request = Message::decode(query, Sections::Questions).ok()?;
                let answers = request
                    .questions
                    .iter()
                    .filter_map(|q| {
                        zone.get(&q.name.to_string())
                            .map(|ip| Answer::for_question(q, 300, ip.to_vec()))
                    })
                    .collect();
                let mut reply = Message::merged_response(&request, answers);
                reply.header.flags = reply.header.flags.with_ra(true);
                Some(reply.with_section_counts().encode())
            }
        }
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for FakeResolver {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
