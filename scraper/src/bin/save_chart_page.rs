use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use hot100_scraper::scraper::{selector_report, CHART_URL};
use hot100_scraper::{is_complete_week, parse_chart, HttpChartSource, WeekAnchor};

/// Save a chart page as an HTML regression fixture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Any date within the chart week to fetch
    date: NaiveDate,

    /// Chart URL prefix; the week's date is appended
    #[arg(long, default_value = CHART_URL)]
    chart_url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let week = WeekAnchor::containing(args.date);
    let source = HttpChartSource::new(&args.chart_url, Duration::from_secs(30))?;
    let url = source.url_for(week);

    println!("Fetching HTML from {}...", url);
    let html = source.fetch_html(&url)?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", week));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;
    println!("Saved HTML to {} for regression testing", file_path.display());

    println!("\nSelector matches:");
    for (field, found) in selector_report(&html)? {
        println!("  - {}: {}", field, if found { "found" } else { "MISSING" });
    }

    let entries = parse_chart(&html)?;
    if is_complete_week(entries.len()) {
        println!("\nExtracted {} entries. This page parses cleanly.", entries.len());
    } else {
        println!(
            "\nExtracted {} entries. The regression test fails until the extractor handles this page.",
            entries.len()
        );
    }

    Ok(())
}
