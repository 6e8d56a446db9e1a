use disconnect_content::{ ContentFetcherBuilder, GroupSelection };
use std::collections::BTreeSet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    disconnect_content::logging::init_logging(false);

    let first = disconnect_content::fetch_content_domains().await?;

    let all = ContentFetcherBuilder::new()
        .selection(GroupSelection::AllGroups)
        .output("disconnect-content-all.txt".into())
        .timeout(30)
        .build()?
        .run().await?;

    let first_set: BTreeSet<&String> = first.iter().collect();
    let extra: Vec<&String> = all
        .iter()
        .filter(|d| !first_set.contains(d))
        .collect();

    println!("First group only: {} domains", first.len());
    println!("All groups:       {} domains", all.len());
    println!("Only reachable through extra groups:");
    for (i, domain) in extra.iter().enumerate() {
        println!("{}. {}", i + 1, domain);
    }

    Ok(())
}
