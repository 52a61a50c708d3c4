mod answers;
pub mod message;
pub mod reader;
pub mod transport;

pub use reader::DnsmasqReader;
pub use transport::{DnsTransport, UdpTransport};
