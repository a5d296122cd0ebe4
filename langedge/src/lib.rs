#![doc = include_str!("../README.md")]

mod account;
pub mod batch;
mod client;
pub mod credentials;
mod error;
mod job;
pub mod models;
mod transport;

pub use client::{API_URL, Client, Config, SANDBOX_API_URL};
pub use error::Error;
pub use job::{
    BatchListOrderJobs, BatchListOrderJobsBuilder, SubmitBatchOrder, SubmitBatchOrderBuilder,
    SubmitOrder, SubmitOrderBuilder,
};
pub use models::*;
