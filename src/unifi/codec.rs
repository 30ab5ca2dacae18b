//! Translation between external-dns endpoints and controller records.
//!
//! SRV records travel with separate `priority`, `weight` and `port` fields on
//! the wire but are represented by external-dns as one composite value,
//! `"<priority> <weight> <port> <target>"`. No other record type is rewritten.
use tracing::warn;

use crate::endpoint::Endpoint;
use crate::unifi::types::{DnsRecord, RECORD_TYPE_SRV};
use crate::validation::ValidationError;

/// The unpacked fields of an SRV composite value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvValue {
    pub priority: u32,
    pub weight: u32,
    pub port: u32,
    pub target: String,
}

/// Pack the numeric SRV fields of a wire record into its value and clear them.
pub fn decode_srv(mut record: DnsRecord) -> DnsRecord {
    let field = |value: Option<u32>, name: &str| {
        value.unwrap_or_else(|| {
            warn!(key = %record.key, field = name, "SRV record without field, using 0");
            0
        })
    };
    let priority = field(record.priority, "priority");
    let weight = field(record.weight, "weight");
    let port = field(record.port, "port");

    record.value = format!("{priority} {weight} {port} {}", record.value);
    record.priority = None;
    record.weight = None;
    record.port = None;
    record
}

/// Split an SRV composite value into its four fields.
pub fn encode_srv(composite: &str) -> Result<SrvValue, ValidationError> {
    let fields: Vec<&str> = composite.split_whitespace().collect();
    let [priority, weight, port, target] = fields.as_slice() else {
        return Err(ValidationError::SrvFieldCount(fields.len()));
    };

    Ok(SrvValue {
        priority: parse_field("priority", priority)?,
        weight: parse_field("weight", weight)?,
        port: parse_field("port", port)?,
        target: (*target).to_string(),
    })
}

fn parse_field(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    value.parse().map_err(|_| ValidationError::SrvField {
        field,
        value: value.to_string(),
    })
}

/// Normalize a freshly listed record: SRV fields are packed, others untouched.
pub fn normalize(record: DnsRecord) -> DnsRecord {
    if record.is_srv() {
        decode_srv(record)
    } else {
        record
    }
}

/// Build the record to create for an endpoint.
///
/// Only the first target is used; one call creates exactly one record.
pub fn record_for_endpoint(endpoint: &Endpoint) -> Result<DnsRecord, ValidationError> {
    let target = endpoint
        .targets
        .first()
        .ok_or_else(|| ValidationError::NoTargets(endpoint.dns_name.clone()))?;

    let mut record = DnsRecord {
        id: None,
        key: endpoint.dns_name.clone(),
        record_type: endpoint.record_type.clone(),
        ttl: endpoint.record_ttl,
        value: target.clone(),
        enabled: true,
        ..Default::default()
    };

    if endpoint.record_type == RECORD_TYPE_SRV {
        let srv = encode_srv(target)?;
        record.priority = Some(srv.priority);
        record.weight = Some(srv.weight);
        record.port = Some(srv.port);
        record.value = srv.target;
    }

    Ok(record)
}

/// Convert a normalized record into the endpoint external-dns expects.
pub fn endpoint_for_record(record: &DnsRecord) -> Endpoint {
    Endpoint::new(
        record.key.clone(),
        record.record_type.clone(),
        record.ttl,
        vec![record.value.clone()],
    )
}
