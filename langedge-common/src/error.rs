#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
