//! Synchronous UDP transport for the statistics exchange.
//!
//! Collection runs on the scrape thread, so the exchange is a plain blocking
//! send/receive on an ephemeral-port socket. The trait seam exists so the
//! reader can be tested against a canned exchange.

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use masqstat_domain::ScrapeError;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub trait DnsTransport: Send + Sync {
    /// Send one serialized query and return the raw response bytes.
    fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, ScrapeError>;
}

/// DNS over UDP transport
#[derive(Debug)]
pub struct UdpTransport {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    fn upstream(&self, reason: String) -> ScrapeError {
        ScrapeError::Upstream {
            server: self.server_addr.to_string(),
            reason,
        }
    }
}

impl DnsTransport for UdpTransport {
    fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, ScrapeError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .map_err(|e| self.upstream(format!("failed to bind UDP socket: {}", e)))?;
        socket
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| self.upstream(format!("failed to set socket timeout: {}", e)))?;
        socket
            .set_read_timeout(Some(self.timeout))
            .map_err(|e| self.upstream(format!("failed to set socket timeout: {}", e)))?;

        let bytes_sent = socket
            .send_to(message_bytes, self.server_addr)
            .map_err(|e| self.upstream(format!("failed to send query: {}", e)))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "statistics query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (bytes_received, from_addr) = socket
            .recv_from(&mut recv_buf)
            .map_err(|e| self.upstream(format!("failed to receive response: {}", e)))?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "statistics response received"
        );

        Ok(recv_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_transport_creation() {
        let addr: SocketAddr = "127.0.0.1:53".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_secs(5));
        assert_eq!(transport.server_addr, addr);
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_udp_transport_ipv6() {
        let addr: SocketAddr = "[::1]:53".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_secs(5));
        assert_eq!(transport.server_addr, addr);
    }
}
