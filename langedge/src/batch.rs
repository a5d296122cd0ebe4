//! Splitting a job list into orders.
//!
//! One order may only hold jobs with the same source language, target language
//! and tier. [`partition`] walks the jobs once and cuts a new chunk whenever that
//! key changes or the current chunk is full, so chunks are contiguous runs of the
//! input in the original order.

use crate::Error;
use crate::models::{JobRequest, LanguageCode, Tier};

pub const DEFAULT_MAX_CHUNK_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qualification {
    pub source_lang: LanguageCode,
    pub target_lang: LanguageCode,
    pub tier: Tier,
}

/// Partition `jobs` into qualification-homogeneous chunks of at most `max_chunk_size`.
///
/// Returns [`Error::Config`] when `max_chunk_size` is zero.
pub fn partition(
    jobs: &[JobRequest],
    max_chunk_size: usize,
) -> Result<Vec<&[JobRequest]>, Error> {
    if max_chunk_size == 0 {
        return Err(Error::Config("max_chunk_size must be at least 1".to_owned()));
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut previous: Option<Qualification> = None;
    for (i, job) in jobs.iter().enumerate() {
        let qualification = job.qualification();
        if previous != Some(qualification) || i - start == max_chunk_size {
            if i > start {
                chunks.push(&jobs[start..i]);
            }
            start = i;
        }
        previous = Some(qualification);
    }
    if start < jobs.len() {
        chunks.push(&jobs[start..]);
    }

    Ok(chunks)
}
