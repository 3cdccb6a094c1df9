//! Tree command - browse the upstream taxonomy

use crate::cli::style::spinner_style;
use anstream::{print, println};
use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Duration;
use taxonomy_contrib::config::Config;
use taxonomy_contrib::platform::create_hosting_service;
use taxonomy_contrib::taxonomy::{TreeFilter, fetch_subtree, render_text_tree};

/// Run the tree command
pub async fn run_tree(path: Option<&str>, json: bool, max_depth: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let service = create_hosting_service(&config.upstream).await?;
    let path = path.unwrap_or_default();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching {}/{path}...", config.upstream.repo));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let fetched = fetch_subtree(
        service.as_ref(),
        &config.upstream,
        path,
        &TreeFilter::default(),
        max_depth,
    )
    .await;
    spinner.finish_and_clear();
    let nodes = fetched?;

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        print!("{}", render_text_tree(&nodes));
    }
    Ok(())
}
