use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials for the eBay Browse API (OAuth client-credentials grant).
#[derive(Clone)]
pub struct EbayCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Connection settings for the Azure `OpenAI` captioning deployment.
#[derive(Clone)]
pub struct AzureVisionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub ebay: Option<EbayCredentials>,
    pub ebay_api_base_url: String,
    pub ebay_identity_base_url: String,
    pub ebay_search_limit: u32,
    pub vision: Option<AzureVisionConfig>,
    pub provider_timeout_secs: u64,
}

/// Settings for the command-line client. Holds no provider secrets, so it
/// loads in any environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub log_level: String,
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub showcase_interval_ms: u64,
}

impl std::fmt::Debug for EbayCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EbayCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

impl std::fmt::Debug for AzureVisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureVisionConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[redacted]")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("ebay", &self.ebay)
            .field("ebay_api_base_url", &self.ebay_api_base_url)
            .field("ebay_identity_base_url", &self.ebay_identity_base_url)
            .field("ebay_search_limit", &self.ebay_search_limit)
            .field("vision", &self.vision)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .finish()
    }
}
