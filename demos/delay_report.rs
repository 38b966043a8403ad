//! Drives a request queue with delay-and-report tasks.
//!
//! Seven tasks are submitted to a queue with three slots and three retries.
//! One of them always fails, so it is retried three times, one second apart,
//! before its error hook reports exhaustion.
//!
//! ```text
//! RUST_LOG=info cargo run --example delay_report
//! ```

use std::time::Duration;

use prometheus_request_queue::builders::RequestQueueBuilder;
use prometheus_request_queue::config::QueueConfig;
use prometheus_request_queue::core::{AppResult, TaskHooks};
use prometheus_request_queue::util::init_tracing_with_default;

async fn sleep_and_report(ms: u64) -> AppResult<f64> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tracing::info!("sleep for {} seconds", ms as f64 / 1000.0);
    Ok(ms as f64 / 1000.0)
}

fn report(label: &'static str) -> TaskHooks<f64> {
    TaskHooks::new()
        .on_success(move |secs| tracing::info!(label, secs, "task finished"))
        .on_retry(move |err| tracing::info!(label, error = %err, "task will retry in 1 second"))
        .on_error(move |err| tracing::error!(label, error = %err, "task gave up"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing_with_default("info");

    let config = QueueConfig::from_env().map_err(anyhow::Error::msg)?;
    let queue = RequestQueueBuilder::from_config(config).build::<f64>()?;

    queue.enqueue_with(|| sleep_and_report(1000), report("1s"));
    queue.enqueue_with(|| sleep_and_report(10_000), report("10s"));
    queue.enqueue_with(|| sleep_and_report(3000), report("3s"));
    queue.enqueue_with(|| async { anyhow::bail!("aa") }, report("always fails"));
    queue.enqueue_with(|| sleep_and_report(1500), report("1.5s a"));
    queue.enqueue_with(|| sleep_and_report(1500), report("1.5s b"));
    queue.enqueue_with(|| sleep_and_report(1500), report("1.5s c"));

    queue.wait_idle().await;
    let stats = queue.stats();
    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        "all tasks settled"
    );
    Ok(())
}
