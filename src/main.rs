use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use redwood_feed::{
    config::Config,
    models::InteractionKind,
    services::{api::HttpApiClient, FeedController, FeedOptions, MatchList},
    storage::FileStore,
    view::ConsolePresenter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, storage = %config.storage_path, "Starting feed");

    let client = Arc::new(HttpApiClient::new(
        &config.api_base_url,
        config.session_cookie.as_deref(),
    )?);
    let store = Arc::new(FileStore::open(&config.storage_path)?);

    let feed = FeedController::new(
        client.clone(),
        store,
        Arc::new(ConsolePresenter::new()),
        FeedOptions {
            placeholder_image_url: config.placeholder_image_url.clone(),
            ..FeedOptions::default()
        },
    );
    let mut matches = MatchList::new(client);

    feed.check_and_load_recommendations().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "l" | "like" => {
                feed.interact(InteractionKind::Liked).await;
            }
            "d" | "dislike" => {
                feed.interact(InteractionKind::Disliked).await;
            }
            "s" | "superlike" => {
                feed.interact(InteractionKind::Superliked).await;
            }
            "r" | "report" => {
                feed.report_candidate(rest.trim()).await;
            }
            "m" | "matches" => match matches.load().await {
                Ok(cards) if cards.is_empty() => println!("\nNo matches yet."),
                Ok(cards) => {
                    for card in cards {
                        println!("{:>6}  {} ({}) - {}", card.id, card.name, card.age, card.city);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to fetch matches"),
            },
            "q" | "quit" => break,
            "" => continue,
            other => println!("Unknown command: {}", other),
        }

        // Prefetches, photos and reports run in the background; keep output ordered
        feed.settle().await;
    }

    feed.settle().await;
    tracing::info!(seen = feed.snapshot().seen.len(), "Feed closed");

    Ok(())
}
