use crate::endpoint::DomainFilter;

const LOGIN_PATH: &str = "/api/auth/login";
const LOGIN_PATH_EXTERNAL: &str = "/api/login";
const RECORD_PATH: &str = "/proxy/network/v2/api/site/{site}/static-dns/";
const RECORD_PATH_EXTERNAL: &str = "/v2/api/site/{site}/static-dns/";

/// Connection settings for a single UniFi controller.
#[derive(Clone)]
pub struct UnifiConfig {
    pub host: String, // e.g. "https://192.168.1.1"
    pub user: String,
    pub password: String,
    pub site: String, // usually "default"
    pub skip_tls_verify: bool,
    pub external_controller: bool,
}

impl UnifiConfig {
    /// Controller base URL without a trailing slash.
    pub fn host_root(&self) -> &str {
        self.host.trim_end_matches('/')
    }
}

impl std::fmt::Debug for UnifiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnifiConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("site", &self.site)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("external_controller", &self.external_controller)
            .finish()
    }
}

/// Login and record URLs, bound once from the controller mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUrls {
    pub login: String,
    records: String,
}

impl ClientUrls {
    pub fn new(config: &UnifiConfig) -> Self {
        let (login, records) = if config.external_controller {
            (LOGIN_PATH_EXTERNAL, RECORD_PATH_EXTERNAL)
        } else {
            (LOGIN_PATH, RECORD_PATH)
        };

        let host = config.host_root();
        Self {
            login: format!("{host}{login}"),
            records: format!("{host}{}", records.replace("{site}", &config.site)),
        }
    }

    /// Collection URL used for listing and creating records.
    pub fn records(&self) -> &str {
        &self.records
    }

    /// URL of a single record, used for deletion.
    pub fn record(&self, id: &str) -> String {
        format!("{}{}", self.records, id)
    }
}

/// Settings of the webhook server itself.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub domain_filter: DomainFilter,
}
