use ainews::{
    fallback, Category, EnrichmentCapability, FeedSource, FetchConfig, NewsService,
    PipelineConfig, RssFeedSource, SourceConfig,
};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ainews", about = "AI news aggregation and enrichment pipeline")]
struct Args {
    /// Bypass the cache and force a fresh aggregation
    #[arg(long)]
    force_refresh: bool,

    /// Also generate a daily brief over the fetched items
    #[arg(long)]
    brief: bool,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn default_sources(
    fetch_config: &FetchConfig,
    max_items: usize,
) -> anyhow::Result<Vec<Arc<dyn FeedSource>>> {
    let configs = vec![
        SourceConfig::new("https://www.jiqizhixin.com/rss", "机器之心", Category::Industry),
        SourceConfig::new("https://hnrss.org/newest?q=AI", "Hacker News AI", Category::Tools),
    ];

    configs
        .into_iter()
        .map(|config| {
            let name = config.name.clone();
            RssFeedSource::new(config, fetch_config, max_items)
                .map(|source| Arc::new(source) as Arc<dyn FeedSource>)
                .with_context(|| format!("failed to build source {}", name))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let pipeline_config = PipelineConfig::default();
    let fetch_config = FetchConfig::default();
    let sources = default_sources(&fetch_config, pipeline_config.max_items_per_source)?;

    let capability = EnrichmentCapability::from_env();
    let service = NewsService::from_capability(sources, &capability, pipeline_config);

    let items = service
        .query(args.force_refresh)
        .await
        .context("news query failed")?;
    info!("Fetched {} items", items.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!(
                "[{}] {} - {} ({})",
                item.category, item.title, item.source, item.date
            );
            println!("    {}", item.summary);
            println!("    {}", item.url);
        }
    }

    if args.brief {
        let brief = match service.daily_brief().await {
            Ok(brief) => brief,
            Err(e) => {
                warn!("Brief generation unavailable, using bundled brief: {}", e);
                fallback::fallback_brief()
            }
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&brief)?);
        } else {
            println!("\n今日简报：{}", brief.trending_topic);
            for highlight in &brief.highlights {
                println!("  - {}", highlight);
            }
            println!("{}", brief.summary_text);
        }
    }

    Ok(())
}
