//! external-dns webhook contract types.
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, normalize_domain, validate_domain};

/// A provider-specific property attached to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecific {
    pub name: String,
    pub value: String,
}

/// One DNS name with its targets, as external-dns understands it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub dns_name: String,
    pub record_type: String,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(rename = "recordTTL", default, skip_serializing_if = "is_zero")]
    pub record_ttl: u32,
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub labels: std::collections::BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_specific: Vec<ProviderSpecific>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,
}

fn is_zero(ttl: &u32) -> bool {
    *ttl == 0
}

impl Endpoint {
    pub fn new(
        dns_name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        targets: Vec<String>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            record_type: record_type.into(),
            targets,
            record_ttl: ttl,
            ..Default::default()
        }
    }
}

/// Payload sent by external-dns to `POST /records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    #[serde(default)]
    pub create: Vec<Endpoint>,
    #[serde(default)]
    pub update_old: Vec<Endpoint>,
    #[serde(default)]
    pub update_new: Vec<Endpoint>,
    #[serde(default)]
    pub delete: Vec<Endpoint>,
}

/// Suffix-based filter deciding which names this provider owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl DomainFilter {
    /// Build a filter from raw entries, normalizing and validating each.
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: normalize_all(include)?,
            exclude: normalize_all(exclude)?,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = normalize_domain(name);
        let included =
            self.include.is_empty() || self.include.iter().any(|d| is_within(&name, d));
        included && !self.exclude.iter().any(|d| is_within(&name, d))
    }
}

fn normalize_all<I>(entries: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| normalize_domain(entry.as_ref()))
        .filter(|entry| !entry.is_empty())
        .map(|entry| validate_domain(&entry).map(|_| entry))
        .collect()
}

fn is_within(name: &str, domain: &str) -> bool {
    name == domain
        || name
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
