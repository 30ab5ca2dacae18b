//! external-dns provider backed by the UniFi client.
use async_trait::async_trait;
use tracing::info;

use crate::endpoint::{Changes, DomainFilter, Endpoint};
use crate::error::UnifiError;
use crate::unifi::{UnifiClient, codec};

/// Operations the webhook surface needs from a DNS backend.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    async fn records(&self) -> Result<Vec<Endpoint>, UnifiError>;

    async fn apply_changes(&self, changes: Changes) -> Result<(), UnifiError>;

    async fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>, UnifiError> {
        Ok(endpoints)
    }
}

pub struct UnifiProvider {
    client: UnifiClient,
    domain_filter: DomainFilter,
}

impl UnifiProvider {
    pub fn new(client: UnifiClient, domain_filter: DomainFilter) -> Self {
        Self {
            client,
            domain_filter,
        }
    }
}

#[async_trait]
impl DnsProvider for UnifiProvider {
    async fn records(&self) -> Result<Vec<Endpoint>, UnifiError> {
        let records = self.client.list().await?;

        Ok(records
            .iter()
            .filter(|r| self.domain_filter.matches(&r.key))
            .map(codec::endpoint_for_record)
            .collect())
    }

    /// Old and deleted records go first so updates never collide.
    async fn apply_changes(&self, changes: Changes) -> Result<(), UnifiError> {
        info!(
            create = changes.create.len(),
            update = changes.update_new.len(),
            delete = changes.delete.len(),
            "applying changes"
        );

        for endpoint in changes.update_old.iter().chain(&changes.delete) {
            self.client.delete(endpoint).await?;
        }
        for endpoint in changes.create.iter().chain(&changes.update_new) {
            self.client.create(endpoint).await?;
        }

        Ok(())
    }
}
