//! Show and edit commands - work on an open contribution

use crate::cli::progress::{CliProgress, Reported};
use crate::cli::request::read_edit_request;
use crate::cli::style::{Stream, Stylize, arrow, hyperlink_url, spinner_style};
use crate::cli::submit::confirmed;
use anstream::{print, println};
use anyhow::Result;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;
use taxonomy_contrib::config::Config;
use taxonomy_contrib::document::{normalize_dir, render_attribution};
use taxonomy_contrib::platform::{HostingService, create_hosting_service};
use taxonomy_contrib::publish::{EditableSubmission, load_submission, update_submission};
use taxonomy_contrib::types::UpstreamConfig;

async fn load_with_spinner(
    service: &dyn HostingService,
    upstream: &UpstreamConfig,
    number: u64,
) -> Result<EditableSubmission> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Loading pull request #{number}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let loaded = load_submission(service, upstream, number).await;
    spinner.finish_and_clear();
    Ok(loaded?)
}

fn print_summary(editable: &EditableSubmission) {
    let pr = &editable.pull_request;
    println!(
        "{} {}",
        format!("#{}", pr.number).accent(),
        pr.title.emphasis()
    );
    println!("  {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    println!("  kind:       {}", editable.kind);
    println!("  branch:     {} in {}", pr.head_ref.accent(), editable.fork);
    println!("  directory:  {}", editable.directory.accent());
    println!("  created_by: {}", editable.document.created_by());
    println!("  headline:   {}", editable.document.headline());
    println!("  examples:   {}", editable.document.seed_example_count());
}

/// Run the show command
pub async fn run_show(number: u64) -> Result<()> {
    let config = Config::load()?;
    let service = create_hosting_service(&config.upstream).await?;
    let editable = load_with_spinner(service.as_ref(), &config.upstream, number).await?;

    print_summary(&editable);
    println!();
    println!("{}", editable.yaml_path.muted());
    print!("{}", editable.document.to_yaml()?);
    println!();
    println!("{}", editable.attribution_path.muted());
    print!("{}", render_attribution(&editable.attribution));
    Ok(())
}

/// Run the edit command
pub async fn run_edit(number: u64, request: &Path, yes: bool) -> Result<()> {
    let edit = read_edit_request(request)?;
    let config = Config::load()?;
    let service = create_hosting_service(&config.upstream).await?;
    let editable = load_with_spinner(service.as_ref(), &config.upstream, number).await?;

    print_summary(&editable);
    let target = if edit.file_path.trim().is_empty() {
        editable.directory.clone()
    } else {
        normalize_dir(&edit.file_path)
    };
    if target != editable.directory {
        println!(
            "  {} Move {} to {}",
            arrow(),
            editable.directory.accent(),
            target.accent()
        );
    }
    println!(
        "  {} Replace the tip commit of {}",
        arrow(),
        editable.pull_request.head_ref.accent()
    );
    println!();

    if !confirmed("Update this pull request?", yes)? {
        println!("Aborted");
        return Ok(());
    }

    update_submission(
        service.as_ref(),
        &config.upstream,
        &editable,
        &edit,
        &CliProgress,
    )
    .await
    .map_err(Reported)?;
    Ok(())
}
