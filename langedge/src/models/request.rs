use super::{JobType, LanguageCode, Tier};
use crate::batch::Qualification;
use bon::Builder;
use serde::Serialize;

/// A translation job to submit.
///
/// Optional fields left unset are omitted from the payload rather than sent as `null`.
///
/// ```
/// use langedge::{JobRequest, LanguageCode, Tier};
///
/// let job = JobRequest::builder()
///     .slug("greeting")
///     .source_text("Hello")
///     .source_lang(LanguageCode::En)
///     .target_lang(LanguageCode::Ja)
///     .tier(Tier::Standard)
///     .auto_approve(false)
///     .comment("keep it formal")
///     .build();
/// assert_eq!(job.comment.as_deref(), Some("keep it formal"));
/// ```
#[serde_with::skip_serializing_none]
#[derive(Builder, Serialize, Debug, Clone, PartialEq)]
#[builder(on(String, into))]
pub struct JobRequest {
    #[builder(default)]
    pub job_type: JobType,
    pub slug: String,
    #[serde(rename = "body_src")]
    pub source_text: String,
    #[serde(rename = "lc_src")]
    pub source_lang: LanguageCode,
    #[serde(rename = "lc_tgt")]
    pub target_lang: LanguageCode,
    pub tier: Tier,
    pub auto_approve: bool,
    pub comment: Option<String>,
    pub callback_url: Option<String>,
    pub custom_data: Option<String>,
    pub force: Option<bool>,
    pub use_preferred: Option<bool>,
}

impl JobRequest {
    /// Jobs sharing a qualification can go into the same order.
    pub fn qualification(&self) -> Qualification {
        Qualification {
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            tier: self.tier,
        }
    }
}
