use super::{BillingType, Currency, CustomerType, JobStatus, LanguageCode, Tier};
use serde::{Deserialize, Deserializer};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use time::OffsetDateTime;

// The service sends most numbers as strings, so numeric fields accept both.

//region account
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    pub email: String,
    pub full_name: String,
    pub display_name: String,
    pub language_code: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Balance {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits: f64,
    pub currency: Currency,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Stat {
    #[serde(with = "time::serde::timestamp")]
    pub user_since: OffsetDateTime,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits_spent: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub processing: f64,
    pub currency: Currency,
    pub customer_type: CustomerType,
    pub billing_type: BillingType,
}
//endregion

//region order
/// Result of submitting one order.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct OrderResult {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub order_id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub job_count: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits_used: f64,
    pub currency: Currency,
}

/// Job status overview of an order. Each `jobs_*` list keeps the server's order.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub order_id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_credits: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_units: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_jobs: u32,
    pub currency: Currency,
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub jobs_available: Vec<u64>,
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub jobs_pending: Vec<u64>,
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub jobs_reviewable: Vec<u64>,
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub jobs_approved: Vec<u64>,
    #[serde_as(as = "Vec<PickFirst<(_, DisplayFromStr)>>")]
    pub jobs_revising: Vec<u64>,
    /// Number of jobs still queued on the service side
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub jobs_queued: u32,
}

#[derive(Deserialize, Debug)]
pub(crate) struct OrderPayload {
    pub(crate) order: Order,
}
//endregion

//region job
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub job_id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub credits: f64,
    /// Estimated seconds until completion
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub eta: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub order_id: u64,
    pub currency: Currency,
    #[serde(rename = "ctime", with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    pub status: JobStatus,
    pub slug: String,
    #[serde(rename = "body_src")]
    pub source_text: String,
    #[serde(rename = "body_tgt", default)]
    pub target_text: Option<String>,
    #[serde(rename = "lc_src")]
    pub source_lang: LanguageCode,
    #[serde(rename = "lc_tgt")]
    pub target_lang: LanguageCode,
    pub tier: Tier,
    #[serde(deserialize_with = "bool_from_flag")]
    pub auto_approve: bool,
    pub callback_url: String,
    #[serde(default)]
    pub custom_data: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub unit_count: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub position: u32,
}

#[derive(Deserialize, Debug)]
pub(crate) struct JobsPayload {
    pub(crate) jobs: Vec<Job>,
}

/// `auto_approve` comes back as a bool, `0`/`1`, or `"0"`/`"1"`.
fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(serde::de::Error::custom(format!(
            "invalid auto_approve flag: {n}"
        ))),
        Flag::Str(s) => match s.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "invalid auto_approve flag: {other}"
            ))),
        },
    }
}
//endregion
