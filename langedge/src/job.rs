//! Job and order operations.
//!
//! Bulk operations fan out one request per order (or per id) and collect the
//! results as the requests finish, so `results[i]` is **not** tied to the i-th
//! chunk or id. Match them up with [`OrderResult::order_id`] or
//! [`Order::order_id`].

use crate::batch::{DEFAULT_MAX_CHUNK_SIZE, partition};
use crate::models::{Job, JobRequest, JobsPayload, Order, OrderPayload, OrderResult};
use crate::transport::TRANSLATE_PATH;
use crate::{Client, Error};
use bon::Builder;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::{debug, warn};

//region order body
/// `{"jobs": {"job_0": {...}, "job_1": {...}}}`, keys in input order
#[derive(Serialize)]
struct OrderBody<'a> {
    jobs: IndexedJobs<'a>,
}

struct IndexedJobs<'a>(&'a [JobRequest]);

impl Serialize for IndexedJobs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, job) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("job_{i}"), job)?;
        }
        map.end()
    }
}

fn order_body(jobs: &[JobRequest]) -> String {
    // string keys and plain fields only, serializing cannot fail
    serde_json::to_string(&OrderBody {
        jobs: IndexedJobs(jobs),
    })
    .expect("order body serializes to JSON")
}
//endregion

//region submit order
#[derive(Builder)]
pub struct SubmitOrder<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    jobs: &'a [JobRequest],
}

impl SubmitOrder<'_> {
    /// Submit all jobs as one order.
    pub async fn send(&self) -> Result<OrderResult, Error> {
        self.client.post_order(self.jobs).await
    }
}
//endregion

//region submit batch order
#[derive(Builder)]
pub struct SubmitBatchOrder<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    jobs: &'a [JobRequest],
    #[builder(default = DEFAULT_MAX_CHUNK_SIZE)]
    max_chunk_size: usize,
}

impl SubmitBatchOrder<'_> {
    /// Submit one order per chunk concurrently.
    ///
    /// Waits for every order to finish, then fails with the first error in completion
    /// order if any order failed. Use [`send_settled`](Self::send_settled) to keep the
    /// orders that went through.
    pub async fn send(&self) -> Result<Vec<OrderResult>, Error> {
        self.send_settled().await?.into_iter().collect()
    }

    /// Like [`send`](Self::send) but returns each order's outcome, in completion order.
    ///
    /// The outer error is only for configuration problems found before anything is sent.
    pub async fn send_settled(&self) -> Result<Vec<Result<OrderResult, Error>>, Error> {
        let chunks = partition(self.jobs, self.max_chunk_size)?;
        debug!(
            jobs = self.jobs.len(),
            orders = chunks.len(),
            max_chunk_size = self.max_chunk_size,
            "submitting batch order"
        );

        let client = self.client;
        Ok(settle(chunks.into_iter().map(|chunk| client.post_order(chunk))).await)
    }
}
//endregion

//region batch list order jobs
#[derive(Builder)]
pub struct BatchListOrderJobs<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    order_ids: &'a [u64],
}

impl BatchListOrderJobs<'_> {
    /// Fetch every order concurrently; fails with the first error in completion order.
    pub async fn send(&self) -> Result<Vec<Order>, Error> {
        self.send_settled().await.into_iter().collect()
    }

    /// Each order's outcome, in completion order.
    pub async fn send_settled(&self) -> Vec<Result<Order, Error>> {
        let client = self.client;
        settle(self.order_ids.iter().map(|&id| client.list_order_jobs(id))).await
    }
}
//endregion

/// Drive all futures to completion, collecting outcomes as they finish.
async fn settle<T, F>(futures: impl IntoIterator<Item = F>) -> Vec<Result<T, Error>>
where
    F: Future<Output = Result<T, Error>>,
{
    let mut pending = futures.into_iter().collect::<FuturesUnordered<_>>();
    let mut results = Vec::with_capacity(pending.len());
    while let Some(res) = pending.next().await {
        if let Err(e) = &res {
            warn!(error = %e, "batch request failed");
        }
        results.push(res);
    }
    results
}

impl Client {
    pub fn submit_order(&self) -> SubmitOrderBuilder<'_> {
        SubmitOrder::builder(self)
    }

    /// Split jobs into orders by language pair and tier, then submit them concurrently.
    ///
    /// `max_chunk_size` defaults to 50 jobs per order.
    pub fn submit_batch_order(&self) -> SubmitBatchOrderBuilder<'_> {
        SubmitBatchOrder::builder(self)
    }

    pub fn batch_list_order_jobs(&self) -> BatchListOrderJobsBuilder<'_> {
        BatchListOrderJobs::builder(self)
    }

    /// Job status overview of one order
    pub async fn list_order_jobs(&self, order_id: u64) -> Result<Order, Error> {
        let payload: OrderPayload = self
            .get(TRANSLATE_PATH, &format!("order/{order_id}"), BTreeMap::new())
            .await?;
        Ok(payload.order)
    }

    /// Full records of the given jobs, in the order the service returns them.
    pub async fn list_jobs(&self, job_ids: &[u64]) -> Result<Vec<Job>, Error> {
        if job_ids.is_empty() {
            return Err(Error::Config("job_ids must not be empty".to_owned()));
        }
        let ids = job_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let payload: JobsPayload = self
            .get(TRANSLATE_PATH, &format!("jobs/{ids}"), BTreeMap::new())
            .await?;
        Ok(payload.jobs)
    }

    async fn post_order(&self, jobs: &[JobRequest]) -> Result<OrderResult, Error> {
        if jobs.is_empty() {
            return Err(Error::Config("an order needs at least one job".to_owned()));
        }
        let data = order_body(jobs);
        self.post(TRANSLATE_PATH, "jobs", data).await
    }
}
