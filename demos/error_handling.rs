//! Example: branching on the error taxonomy.
//!
//! Run with: `ZSXQ_TOKEN=... cargo run --example error_handling <group_id>`

use std::time::Duration;
use zsxq_sdk::{Backoff, Client, ClientError, ErrorKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("zsxq_sdk=info")
        .init();

    println!("=== Example 1: Configuration errors never reach the network ===");
    match Client::builder().credential("   ").build() {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("{} error: {}", e.kind(), e),
    }
    println!();

    let token = std::env::var("ZSXQ_TOKEN").unwrap_or_else(|_| "invalid-token".to_string());
    let client = Client::builder()
        .credential(token)
        .timeout(Duration::from_secs(5))
        .retry(2)
        .backoff(Backoff::Exponential {
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
            jitter: true,
        })
        .build()?;

    let group_id: i64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    println!("=== Example 2: Owner-only dashboard ===");
    match client.dashboard().get_incomes(group_id).await {
        Ok(incomes) => println!("Total income: {:?}", incomes.total_amount),
        Err(ClientError::Authorization { message, .. }) => {
            println!("Not allowed (owner role required): {}", message)
        }
        Err(e) => println!("{} error: {}", e.kind(), e),
    }
    println!();

    println!("=== Example 3: Invalid arguments fail locally ===");
    if let Err(e) = client.groups().get(-1).await {
        assert_eq!(e.kind(), ErrorKind::Request);
        println!("{}", e);
    }
    println!();

    println!("=== Example 4: Retryable vs. final ===");
    match client.checkins().get_statistics(group_id, 1).await {
        Ok(stats) => println!(
            "{} of {} completed",
            stats.completed_count, stats.joined_count
        ),
        Err(e) if e.is_retryable() => println!("Transient failure after retries: {}", e),
        Err(e) => println!("Permanent failure ({}): {}", e.kind(), e),
    }

    Ok(())
}
