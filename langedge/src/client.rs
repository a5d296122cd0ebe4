use crate::Error;
use crate::credentials::Credential;
use bon::bon;
use serde::Deserialize;

pub const API_URL: &str = "https://api.gengo.com/v2";
pub const SANDBOX_API_URL: &str = "https://api.sandbox.gengo.com/v2";

/// Client configuration as it would be kept in a config file.
///
/// ```
/// let conf: langedge::Config = toml::from_str(r#"
/// public_key = "pub"
/// private_key = "priv"
/// "#).unwrap();
/// let client = langedge::Client::from_config(&conf).unwrap();
/// assert_eq!(client.credential().base_url(), langedge::API_URL);
/// ```
#[derive(Deserialize, Clone)]
pub struct Config {
    pub public_key: String,
    pub private_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    API_URL.to_owned()
}

pub struct Client {
    pub(crate) credential: Credential,
    pub(crate) http_client: reqwest::Client,
}

#[bon]
impl Client {
    #[builder(on(String, into))]
    pub fn new(
        public_key: String,
        private_key: String,
        #[builder(default = default_base_url())] base_url: String,
        /// Reuse an existing connection pool; defaults to a fresh `reqwest::Client`.
        http_client: Option<reqwest::Client>,
    ) -> Result<Self, Error> {
        let credential = Credential::new(base_url, public_key, private_key)?;
        Ok(Self {
            credential,
            http_client: http_client.unwrap_or_default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::builder()
            .public_key(config.public_key.as_str())
            .private_key(config.private_key.as_str())
            .base_url(config.base_url.as_str())
            .build()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}
