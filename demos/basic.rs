//! Basic example demonstrating the GitHub API client.
//!
//! Run with:
//! ```
//! GITHUB_TOKEN=your-token cargo run --example basic
//! ```
//!
//! The token is optional; without it requests are anonymous and rate
//! limited more tightly.

use futures::TryStreamExt;
use tentacle::{Client, Repository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating GitHub client...");
    let client = Client::from_env()?;
    println!("Connected to: {:?}", client.server());

    let carthage = Repository::new("Carthage", "Carthage");

    let (_, info) = client.execute_one(&carthage.info()).await?;
    println!("\n--- {info} ---");
    println!("  Stars: {}", info.stargazers_count);
    println!("  Open issues: {}", info.open_issues_count);

    // List releases one page at a time
    println!("\n--- Listing Releases ---");
    let mut pages = Box::pin(client.execute_many(&carthage.releases(), None, Some(30)));
    let mut latest = None;
    while let Some(page) = pages.try_next().await? {
        println!("Page {}: {} releases", page.page, page.len());
        for release in page.iter().take(3) {
            println!("  - {}", release.tag);
        }
        if latest.is_none() {
            latest = page.items.into_iter().next();
        }
    }

    // Download the first asset of the latest release
    if let Some(release) = latest {
        println!("\n--- Assets of {} ---", release.tag);
        for asset in &release.assets {
            println!("  - {} ({})", asset.name, asset.content_type);
        }

        if let Some(asset) = release.assets.first() {
            let downloaded = client.download(asset).await?;
            let size = downloaded.read().await?.len();
            println!("Downloaded {} bytes to {}", size, downloaded.path().display());
        }
    }

    println!("\nDone!");
    Ok(())
}
