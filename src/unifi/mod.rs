//! Session-authenticated client for the UniFi static DNS API.

pub mod client;
pub mod codec;
pub mod cookies;
pub mod session;
pub mod types;

pub use client::UnifiClient;
pub use session::SessionStatus;
pub use types::DnsRecord;
