//! Cos client
mod args;
mod bucket;
mod client;
mod executor;
mod operate_bucket;
mod querymap;

pub use args::BucketArgs;
pub use bucket::Bucket;
pub use client::*;
pub use executor::BaseExecutor;
pub use querymap::QueryMap;
