use anyhow::{ Context, Result };
use clap::Parser;
use disconnect_content::{
    logging,
    ContentFetcherBuilder,
    GroupSelection,
    CONTENT_CATEGORY,
    DEFAULT_OUTPUT,
    DISCONNECT_URL,
};
use std::path::PathBuf;

/// Fetch Disconnect's tracker list and write one category's domains to a blocklist file.
#[derive(Debug, Parser)]
#[command(name = "disconnect-content", version, about)]
struct Cli {
    /// Tracker list to download.
    #[arg(long, default_value = DISCONNECT_URL)]
    url: String,

    /// Category whose domains are written.
    #[arg(long, default_value = CONTENT_CATEGORY)]
    category: String,

    /// Output file, overwritten on every run.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Take every domain group of every provider instead of only the first one per site.
    #[arg(long)]
    all_groups: bool,

    /// Request timeout in seconds (none by default).
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the category names of the list and exit without writing anything.
    #[arg(long)]
    list_categories: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    let selection = if cli.all_groups {
        GroupSelection::AllGroups
    } else {
        GroupSelection::FirstGroup
    };

    let mut builder = ContentFetcherBuilder::new()
        .url(cli.url)
        .category(cli.category.clone())
        .output(cli.output)
        .selection(selection);
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(secs);
    }
    let fetcher = builder.build().context("Failed to set up the fetcher")?;

    if cli.list_categories {
        let list = fetcher.fetch_list().await.context("Failed to fetch the tracker list")?;
        for name in list.category_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let domains = fetcher
        .run().await
        .with_context(|| format!("Failed to refresh {}", fetcher.output().display()))?;

    println!(
        "Wrote {} {} domains to {}",
        domains.len(),
        cli.category,
        fetcher.output().display()
    );

    Ok(())
}
