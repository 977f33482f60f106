//! Basic example: read your profile, your groups, and a group's digests.
//!
//! Run with: `ZSXQ_TOKEN=... cargo run --example basic_call [group_id]`

use zsxq_sdk::api::{ListTopicsOptions, TopicScope};
use zsxq_sdk::{Client, ClientError};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt()
        .with_env_filter("zsxq_sdk=debug,basic_call=info")
        .init();

    let token = std::env::var("ZSXQ_TOKEN").unwrap_or_default();
    let client = Client::builder().credential(token).build()?;

    println!("=== Current User ===");
    let me = client.users().current_user().await?;
    println!("{} ({})", me.name, me.user_id);
    println!();

    println!("=== Groups ===");
    let groups = client.groups().list().await?;
    for group in &groups {
        println!("{:>16}  {}  [{}]", group.group_id, group.name, group.group_type);
    }
    println!();

    let group_id = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .or_else(|| groups.first().map(|g| g.group_id));

    if let Some(group_id) = group_id {
        println!("=== Latest Digests in {} ===", group_id);
        let digests = client
            .topics()
            .list(
                group_id,
                ListTopicsOptions::new().scope(TopicScope::Digests).count(5),
            )
            .await?;
        for topic in digests {
            println!(
                "{}  {}  likes={}",
                topic.topic_id,
                topic.title.as_deref().unwrap_or("(untitled)"),
                topic.likes_count
            );
        }
    }

    Ok(())
}
