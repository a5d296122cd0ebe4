use crate::{Client, Error};
use langedge_common::helper::{encode_form_body, parse_json_response};
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

pub(crate) const ACCOUNT_PATH: &str = "account";
pub(crate) const TRANSLATE_PATH: &str = "translate";

const USER_AGENT_VALUE: &str = "langedge";

/// Every successful payload is wrapped as `{"response": ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    response: T,
}

impl Client {
    /// Send one signed request and decode the enveloped payload.
    ///
    /// With `data`, the JSON is sent as the single form field `data`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        service_path: &str,
        path: &str,
        params: BTreeMap<String, String>,
        data: Option<String>,
    ) -> Result<T, Error> {
        let query = self.credential.sign(params);
        let url_ = Url::parse_with_params(
            &format!("{}/{}/{}", self.credential.base_url(), service_path, path),
            query,
        )
        .map_err(|e| Error::Config(format!("invalid request url: {e}")))?;

        debug!(%method, service_path, path, "sending request");

        let mut req = self
            .http_client
            .request(method, url_)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE);
        if let Some(data) = data {
            let body = encode_form_body([("data", data.as_str())]);
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(CONTENT_LENGTH, body.len())
                .body(body);
        }

        let resp = req.send().await?;
        let envelope: Envelope<T> = parse_json_response(resp).await?;
        Ok(envelope.response)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        service_path: &str,
        path: &str,
        params: BTreeMap<String, String>,
    ) -> Result<T, Error> {
        self.request(Method::GET, service_path, path, params, None)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        service_path: &str,
        path: &str,
        data: String,
    ) -> Result<T, Error> {
        self.request(Method::POST, service_path, path, BTreeMap::new(), Some(data))
            .await
    }
}
