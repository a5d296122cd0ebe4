#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid client or request configuration, raised before any request is sent.
    #[error("config error: {0}")]
    Config(String),
    #[error("request api failed: {status}, message: {message}")]
    RequestAPIFailed { status: String, message: String },
    /// The response body did not match the expected model.
    #[error("decode error: {0}")]
    Decode(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<langedge_common::Error> for Error {
    fn from(e: langedge_common::Error) -> Self {
        match e {
            langedge_common::Error::RequestAPIFailed { status, message } => {
                Error::RequestAPIFailed { status, message }
            }
            langedge_common::Error::Decode(msg) => Error::Decode(msg),
            langedge_common::Error::Reqwest(e) => Error::Reqwest(e),
        }
    }
}
