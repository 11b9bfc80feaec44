use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};

use crate::chart::RawEntry;
use crate::error::FetchError;
use crate::week::WeekAnchor;

pub const CHART_URL: &str = "https://www.billboard.com/charts/hot-100/";

const USER_AGENT: &str = concat!("hot100-scraper/", env!("CARGO_PKG_VERSION"));

const ROW: &str = ".chart-list__element";

/// Field name and the selector it is read from, in archive column order.
const FIELDS: [(&str, &str); 8] = [
    ("Rank", ".chart-element__rank__number"),
    ("Song", ".chart-element__information__song"),
    ("Artist", ".chart-element__information__artist"),
    ("LastWeek", ".chart-element__meta.text--last"),
    ("Trend", ".chart-element__trend"),
    ("Movement", ".chart-element__information__delta__text.text--default"),
    ("Peak", ".chart-element__meta.text--peak"),
    ("Weeks", ".chart-element__meta.text--week"),
];

/// Where the entries for a chart week come from.
pub trait ChartSource {
    fn fetch_week(&self, week: WeekAnchor) -> Result<Vec<RawEntry>, FetchError>;
}

pub fn chart_url(base: &str, week: WeekAnchor) -> String {
    format!("{}{}", base, week)
}

/// Fetches chart pages over HTTP, one blocking request at a time.
pub struct HttpChartSource {
    client: Client,
    base_url: String,
}

impl HttpChartSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(HttpChartSource {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn url_for(&self, week: WeekAnchor) -> String {
        chart_url(&self.base_url, week)
    }

    pub fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let request_failed = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().map_err(request_failed)
    }
}

impl ChartSource for HttpChartSource {
    fn fetch_week(&self, week: WeekAnchor) -> Result<Vec<RawEntry>, FetchError> {
        let url = self.url_for(week);
        log::info!("Scraping {}", url);

        let html = self.fetch_html(&url)?;
        let entries = parse_chart(&html)?;
        if entries.is_empty() {
            return Err(FetchError::NoEntries { url });
        }
        Ok(entries)
    }
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Text of every element under `row` matching `selector`, concatenated.
fn field_text(row: &ElementRef, selector: &Selector) -> String {
    row.select(selector)
        .flat_map(|element| element.text())
        .collect::<String>()
}

/// Extracts the raw chart rows from a chart page, in page order.
///
/// A page without any chart rows yields an empty list; deciding whether that
/// is a failure is up to the caller.
pub fn parse_chart(html: &str) -> Result<Vec<RawEntry>, FetchError> {
    let document = Html::parse_document(html);
    let row_selector = selector(ROW)?;
    let fields = FIELDS
        .iter()
        .map(|(_, css)| selector(css))
        .collect::<Result<Vec<_>, _>>()?;

    let entries = document
        .select(&row_selector)
        .map(|row| RawEntry {
            rank: field_text(&row, &fields[0]),
            song: field_text(&row, &fields[1]),
            artist: field_text(&row, &fields[2]),
            last_week: field_text(&row, &fields[3]),
            trend: field_text(&row, &fields[4]),
            movement: field_text(&row, &fields[5]),
            peak: field_text(&row, &fields[6]),
            weeks: field_text(&row, &fields[7]),
        })
        .collect();

    Ok(entries)
}

/// For each archive field, whether its selector matches anywhere on the page.
pub fn selector_report(html: &str) -> Result<Vec<(&'static str, bool)>, FetchError> {
    let document = Html::parse_document(html);
    let mut report = vec![("Row", document.select(&selector(ROW)?).next().is_some())];
    for (name, css) in FIELDS {
        report.push((name, document.select(&selector(css)?).next().is_some()));
    }
    Ok(report)
}
