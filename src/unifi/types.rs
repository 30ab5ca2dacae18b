use serde::{Deserialize, Serialize};

pub const RECORD_TYPE_SRV: &str = "SRV";

/// A static DNS record as stored by the controller.
///
/// `priority`, `weight` and `port` are only present on SRV records fresh off
/// the wire or about to be sent; the normalized form carries them packed into
/// `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String, // "host.example.com"
    #[serde(alias = "recordType")]
    pub record_type: String, // "A", "AAAA", "CNAME", "TXT", "SRV", ...
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
}

impl DnsRecord {
    pub fn is_srv(&self) -> bool {
        self.record_type == RECORD_TYPE_SRV
    }
}

// Body of the login request
#[derive(Debug, Serialize)]
pub struct Login<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub remember: bool,
}

/// Error payload the controller returns on non-success responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}
