use blog_feed_lib::core::config::FeedConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = FeedConfig::default();
    let summary = blog_feed_lib::run(&config).await?;

    println!(
        "Wrote {} with {} items.",
        summary.out_file.display(),
        summary.item_count
    );
    Ok(())
}
