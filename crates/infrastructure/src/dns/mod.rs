pub mod listener;
pub mod record_encoder;
pub mod server;

pub use listener::{DnsServer, DEFAULT_TCP_IDLE_TIMEOUT};
pub use record_encoder::RecordEncoder;
pub use server::{DnsServerHandler, Transport};
