//! Load generator for the TTL cache server
//!
//! Fires a batch of `/set` requests followed by `/get` requests for randomly
//! chosen keys from that batch, with a bounded number in flight.
//!
//! # Environment Variables
//! - `LOADTEST_BASE_URL` - Server base URL (default: http://localhost:5000)
//! - `LOADTEST_TOTAL_REQUESTS` - Total requests (default: 10000)
//! - `LOADTEST_CONCURRENCY` - Max requests in flight (default: 500)
//! - `LOADTEST_SET_RATIO` - Share of requests that are sets (default: 0.5)
//! - `LOADTEST_TTL` - `duration` sent with each set (default: 1h)

use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rand::Rng;
use reqwest::RequestBuilder;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::models::parse_duration;

#[derive(Debug, Clone)]
struct LoadTestConfig {
    base_url: String,
    total_requests: usize,
    concurrency: usize,
    set_ratio: f64,
    ttl: String,
}

impl LoadTestConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("LOADTEST_BASE_URL").unwrap_or(defaults.base_url),
            total_requests: env_or("LOADTEST_TOTAL_REQUESTS", defaults.total_requests),
            concurrency: env_or("LOADTEST_CONCURRENCY", defaults.concurrency).max(1),
            set_ratio: env_or("LOADTEST_SET_RATIO", defaults.set_ratio).clamp(0.0, 1.0),
            ttl: env::var("LOADTEST_TTL").unwrap_or(defaults.ttl),
        }
    }
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            total_requests: 10_000,
            concurrency: 500,
            set_ratio: 0.5,
            ttl: "1h".to_string(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// One planned request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Set { key: String, value: String },
    Get { key: String },
}

impl Op {
    /// Builds the request; query parameters are percent-encoded.
    fn request(&self, client: &reqwest::Client, base_url: &str, ttl: &str) -> RequestBuilder {
        match self {
            Op::Set { key, value } => client.get(format!("{}/set", base_url)).query(&[
                ("key", key.as_str()),
                ("value", value.as_str()),
                ("duration", ttl),
            ]),
            Op::Get { key } => client
                .get(format!("{}/get", base_url))
                .query(&[("key", key.as_str())]),
        }
    }
}

/// Sets come first so every get targets a key that was written.
fn build_plan(total: usize, set_ratio: f64, rng: &mut impl Rng) -> Vec<Op> {
    let set_count = ((total as f64) * set_ratio).ceil() as usize;
    let set_count = set_count.min(total);

    (0..total)
        .map(|i| {
            if i < set_count {
                Op::Set {
                    key: format!("test{}", i),
                    value: format!("value{}", i),
                }
            } else if set_count == 0 {
                Op::Get {
                    key: format!("test{}", i),
                }
            } else {
                Op::Get {
                    key: format!("test{}", rng.gen_range(0..set_count)),
                }
            }
        })
        .collect()
}

#[derive(Debug, Default)]
struct Counters {
    ok: AtomicU64,
    failed: AtomicU64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loadtest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoadTestConfig::from_env();
    parse_duration(&config.ttl).context("LOADTEST_TTL is not a valid duration")?;
    info!(?config, "Starting load test");

    let plan = build_plan(config.total_requests, config.set_ratio, &mut rand::thread_rng());
    let client = reqwest::Client::new();
    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let counters = Arc::new(Counters::default());
    let mut tasks = JoinSet::new();

    let start = Instant::now();

    // Sets run to completion before the first get is issued
    let (sets, gets): (Vec<Op>, Vec<Op>) =
        plan.into_iter().partition(|op| matches!(op, Op::Set { .. }));

    for phase in [sets, gets] {
        for op in phase {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .context("semaphore closed")?;
            let client = client.clone();
            let counters = counters.clone();
            let request = op
                .request(&client, &config.base_url, &config.ttl)
                .build()
                .context("failed to build request")?;
            let url = request.url().clone();

            tasks.spawn(async move {
                let _permit = permit;
                match client.execute(request).await {
                    Ok(resp) if resp.status().is_success() => {
                        counters.ok.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(resp) => {
                        warn!("Status {} for {}", resp.status(), url);
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        warn!("Error making request to {}: {}", url, e);
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.context("request task panicked")?;
        }
    }

    let elapsed = start.elapsed();
    let total = config.total_requests as f64;
    info!(
        ok = counters.ok.load(Ordering::Relaxed),
        failed = counters.failed.load(Ordering::Relaxed),
        "Completed {} requests in {:?}",
        config.total_requests,
        elapsed
    );
    info!("Requests per second: {:.2}", total / elapsed.as_secs_f64());

    Ok(())
}
