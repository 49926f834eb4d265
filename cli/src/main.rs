//! Terminal front end for the topic feed board.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use feed_core::{ClientConfig, Feed, FeedClient, NewTopic, ReqwestTransport, Topic};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "topic-feed", version, about = "List, submit and vote on board topics")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overriding the configuration.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every topic, most up-voted first.
    List,
    /// Submit a new topic.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Up-vote the topic with this id.
    Upvote { id: String },
    /// Down-vote the topic with this id.
    Downvote { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let feed = Feed::new(FeedClient::new(config), ReqwestTransport);

    let topics = match cli.command {
        Command::List => feed.list().await?,
        Command::Add { title, content } => {
            let topic = feed.compose(NewTopic::new(title, content))?;
            feed.submit_and_reload(topic).await?
        }
        Command::Upvote { id } => {
            let topic = find_topic(&feed, &id).await?;
            feed.upvote_and_reload(topic).await?
        }
        Command::Downvote { id } => {
            let topic = find_topic(&feed, &id).await?;
            feed.downvote_and_reload(topic).await?
        }
    };

    print_topics(&topics);
    Ok(())
}

async fn find_topic(feed: &Feed<ReqwestTransport>, id: &str) -> Result<Topic> {
    feed.list()
        .await?
        .into_iter()
        .find(|t| t.id() == id)
        .ok_or_else(|| anyhow!("no topic with id {id}"))
}

fn print_topics(topics: &[Topic]) {
    if topics.is_empty() {
        println!("No topics yet.");
        return;
    }
    for topic in topics {
        println!("{}", topic.title.as_deref().unwrap_or_default());
        println!("  {}", topic.content.as_deref().unwrap_or_default());
        println!(
            "  by {} on {}",
            topic.created_by.as_deref().unwrap_or_default(),
            topic.created_date.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!(
            "  Up Vote ({})  Down Vote ({})  [{}]",
            topic.up_vote,
            topic.down_vote,
            topic.id()
        );
        println!();
    }
}
