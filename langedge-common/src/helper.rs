use crate::Error;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use time::OffsetDateTime;
use url::form_urlencoded;

/// 当前unix时间戳（秒）
pub fn now_unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// HMAC-SHA1，输出小写hex
pub fn sign_hmac_sha1_hex(secret: &str, str_to_sign: &str) -> String {
    type HmacSha1 = Hmac<Sha1>;
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC takes keys of any size");
    mac.update(str_to_sign.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// `application/x-www-form-urlencoded` body
pub fn encode_form_body<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(message) => Error::RequestAPIFailed {
            status: status.to_string(),
            message,
        },
        Err(e) => Error::Reqwest(e),
    }
}

pub async fn parse_json_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(into_request_failed_error(resp).await);
    }

    let bytes = resp.bytes().await?;
    let data = serde_json::from_slice(&bytes).map_err(|e| {
        Error::Decode(format!(
            "{}, response text: {}",
            e,
            String::from_utf8_lossy(&bytes)
        ))
    })?;
    Ok(data)
}
