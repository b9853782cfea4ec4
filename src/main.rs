use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use manga_watcher::plugins::notifiers::{ConsoleNotifier, DiscordNotifier};
use manga_watcher::plugins::registry::{normalize_site, ScraperRegistry};
use manga_watcher::{AddOutcome, AppConfig, CheckSummary, JsonFileStore, UpdateChecker};

#[derive(Parser)]
#[command(name = "manga-watcher", version, about = "Track manga series and report new chapters")]
struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tracked-series file, overriding storage.path
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a series page and start tracking it
    Add { site: String, url: String },
    /// Check every tracked series for new chapters
    Check,
    /// Show tracked series
    List,
    /// Show supported site identifiers
    Sites,
}

type Checker = UpdateChecker<JsonFileStore>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("manga_watcher=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.storage.path = data;
    }

    info!("Using catalog at {}", config.storage.path.display());

    let mut checker = UpdateChecker::new(
        ScraperRegistry::with_default_scrapers(&config.scraper),
        JsonFileStore::new(&config.storage.path),
    )
    .with_notifier(Box::new(ConsoleNotifier::new()));

    if let Some(discord) = DiscordNotifier::from_config(&config.notifications.discord) {
        checker = checker.with_notifier(Box::new(discord));
    }

    match cli.command {
        Some(Command::Add { site, url }) => add_series(&checker, &site, &url).await?,
        Some(Command::Check) => check(&checker).await?,
        Some(Command::List) => show_tracked(&checker)?,
        Some(Command::Sites) => show_sites(&checker),
        None => run_menu(&checker).await?,
    }

    Ok(())
}

async fn add_series(checker: &Checker, site: &str, url: &str) -> Result<()> {
    let site = normalize_site(site);
    match checker.add_new_series(&site, url).await? {
        AddOutcome::Added { series, replaced } => {
            let verb = if replaced { "Updated" } else { "Successfully added" };
            println!(
                "{} '{}' (chapter {}) on {}.",
                verb, series.title, series.last_chapter, series.site
            );
        }
        AddOutcome::UnknownSite { site } => {
            println!(
                "Error: no scraper for site '{}'. Supported sites: {}",
                site,
                checker.registry().list_sites().join(", ")
            );
        }
        AddOutcome::ScrapeFailed { url, .. } => {
            println!("Could not retrieve series info from {}. Please check the URL.", url);
        }
    }
    Ok(())
}

async fn check(checker: &Checker) -> Result<()> {
    let summary = checker.check_for_updates().await?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &CheckSummary) {
    for site in &summary.skipped_sites {
        println!("Skipped '{}': no scraper for this site.", site);
    }
    for series in &summary.failed_series {
        println!("Could not check '{}' on {}.", series.title, series.site);
    }

    if summary.has_updates() {
        println!(
            "{} new chapter(s) across {} checked series.",
            summary.updates.len(),
            summary.series_checked
        );
    } else {
        println!("No new chapters found ({} series checked).", summary.series_checked);
    }
}

fn show_tracked(checker: &Checker) -> Result<()> {
    let tracked = checker.tracked_series()?;
    if tracked.is_empty() {
        println!("You are not currently tracking any series.");
        return Ok(());
    }

    println!("\n--- Your Tracked Series ---");
    let mut current_site: Option<&str> = None;
    for series in &tracked {
        if current_site != Some(series.site.as_str()) {
            println!("[{}]:", series.site);
            current_site = Some(series.site.as_str());
        }
        println!("  - {}", series.title);
        println!("    - URL: {}", series.url);
        println!("    - Last Checked Chapter: {}", series.last_chapter);
    }
    println!("----------------------------");
    Ok(())
}

fn show_sites(checker: &Checker) {
    for site in checker.registry().list_sites() {
        println!("{}", site);
    }
}

async fn run_menu(checker: &Checker) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("\n--- Manga Watcher Menu ---");
        println!("1. Add a new series to track");
        println!("2. Check for updates");
        println!("3. Show currently tracked series");
        println!("4. Exit");
        println!("--------------------------");

        let Some(choice) = prompt(&mut lines, "Enter your choice (1-4): ").await? else {
            break;
        };

        // Failures are reported and the menu stays available
        let result = match choice.as_str() {
            "1" => {
                let Some(site) = prompt(&mut lines, "Enter the site name (e.g., 'asura'): ").await?
                else {
                    break;
                };
                let Some(url) = prompt(&mut lines, "Enter the full URL of the series: ").await?
                else {
                    break;
                };
                add_series(checker, &site, &url).await
            }
            "2" => check(checker).await,
            "3" => show_tracked(checker),
            "4" => break,
            _ => {
                println!("Invalid choice. Please enter a number between 1 and 4.");
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }

    println!("Exiting application. Goodbye!");
    Ok(())
}

/// Returns `None` once stdin is closed.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.map(|line| line.trim().to_string()))
}
