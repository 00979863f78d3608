//! HTTP client module
//!
//! Provides the HTTP transport with retry, rate limiting, and backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Executor Seam**: `RequestExecutor` lets the engine run against fakes

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig, RequestExecutor};
pub use rate_limit::RateLimiterConfig;

#[cfg(test)]
mod tests;
