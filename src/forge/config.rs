//! Configuration for forge platform connections.
use secrecy::SecretString;

/// Public GitHub host. Any other host is treated as GitHub Enterprise.
pub const DEFAULT_HOST: &str = "github.com";
/// Scheme used for links and API calls when none can be derived.
pub const DEFAULT_SCHEME: &str = "https";

/// Remote forge connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Access token for authentication. Empty means anonymous access.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}

impl RemoteConfig {
    /// REST API base for the configured host.
    pub fn api_base_uri(&self) -> String {
        if self.host == DEFAULT_HOST {
            format!("{}://api.{}", self.scheme, self.host)
        } else {
            format!("{}://{}/api/v3", self.scheme, self.host)
        }
    }
}
