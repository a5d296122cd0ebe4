//! Credential and request signing.
//!
//! Every call is authenticated through three query parameters: the public key
//! (`api_key`), the unix timestamp in seconds (`ts`) and `api_sig`, the lowercase
//! hex HMAC-SHA1 of the timestamp keyed with the private key.
//!
//! # Example
//! ```
//! use langedge::credentials::Credential;
//! use std::collections::BTreeMap;
//!
//! let cred = Credential::new("https://api.gengo.com/v2", "public", "private").unwrap();
//! let signed = cred.sign_at(BTreeMap::new(), 1_700_000_000);
//! assert_eq!(signed["api_key"], "public");
//! assert_eq!(signed["ts"], "1700000000");
//! assert_eq!(signed["api_sig"].len(), 40);
//! ```

use crate::Error;
use langedge_common::helper::{now_unix_timestamp, sign_hmac_sha1_hex};
use std::collections::BTreeMap;
use std::fmt;

pub const API_KEY_PARAM: &str = "api_key";
pub const TIMESTAMP_PARAM: &str = "ts";
pub const SIGNATURE_PARAM: &str = "api_sig";

#[derive(Clone)]
pub struct Credential {
    base_url: String,
    public_key: String,
    private_key: String,
}

impl Credential {
    pub fn new(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = base_url.into();
        let public_key = public_key.into();
        let private_key = private_key.into();

        if public_key.trim().is_empty() {
            return Err(Error::Config("public_key must not be empty".to_owned()));
        }
        if private_key.trim().is_empty() {
            return Err(Error::Config("private_key must not be empty".to_owned()));
        }
        url::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid base_url `{base_url}`: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            public_key,
            private_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign `params` with the current time.
    pub fn sign(&self, params: BTreeMap<String, String>) -> BTreeMap<String, String> {
        self.sign_at(params, now_unix_timestamp())
    }

    /// Sign `params` as if the request were made at `timestamp` (unix seconds).
    ///
    /// The signing fields replace any caller param with the same name.
    pub fn sign_at(
        &self,
        mut params: BTreeMap<String, String>,
        timestamp: i64,
    ) -> BTreeMap<String, String> {
        let ts = timestamp.to_string();
        let signature = sign_hmac_sha1_hex(&self.private_key, &ts);

        params.insert(API_KEY_PARAM.to_owned(), self.public_key.clone());
        params.insert(TIMESTAMP_PARAM.to_owned(), ts);
        params.insert(SIGNATURE_PARAM.to_owned(), signature);
        params
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
