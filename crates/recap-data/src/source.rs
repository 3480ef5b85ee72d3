//! Remote recap sheet fetching.
//!
//! Downloads each staff member's sheet as CSV and turns it into [`RawRow`]s
//! tagged with the staff name, ready for the normalizer.

use recap_core::catalog::sheet_export_url;
use recap_core::error::{RecapError, Result};
use recap_core::models::{RawRow, Source};
use tracing::{debug, info};

// ── Transport ─────────────────────────────────────────────────────────────────

/// Transport seam for retrieving one sheet as CSV text.
///
/// Implementations report every transport-level failure as
/// [`RecapError::Connectivity`].
pub trait FeedFetcher {
    /// Human-readable name of this fetcher, used in logs.
    fn name(&self) -> &str;

    /// Fetch the CSV export of `source`.
    fn fetch_csv(&self, source: &Source) -> Result<String>;
}

/// Fetches sheets from the Google Sheets CSV export endpoint.
pub struct SheetsFetcher {
    client: reqwest::blocking::Client,
    sheet_id: String,
}

impl SheetsFetcher {
    /// Create a fetcher for the workbook `sheet_id`.
    ///
    /// The client keeps reqwest's default timeout; requests are never retried.
    pub fn new(sheet_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("notify-recap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecapError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            sheet_id: sheet_id.into(),
        })
    }

    fn url_for(&self, source: &Source) -> String {
        sheet_export_url(&self.sheet_id, &source.key)
    }
}

impl FeedFetcher for SheetsFetcher {
    fn name(&self) -> &str {
        "google-sheets"
    }

    fn fetch_csv(&self, source: &Source) -> Result<String> {
        let url = self.url_for(source);
        debug!("GET {}", url);

        let connectivity = |reason: String| RecapError::Connectivity {
            source_name: source.name.clone(),
            reason,
        };

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| connectivity(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(connectivity(format!("HTTP {}", status)));
        }

        resp.text().map_err(|e| connectivity(e.to_string()))
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Fetch every source in order and return their rows concatenated.
///
/// Each row carries the source's display name as its first field and is cut
/// (or padded) to exactly `truncate_width + 1` fields. The first data row of
/// every sheet is discarded. A failure on any source aborts the whole fetch.
pub fn fetch_sources(
    fetcher: &dyn FeedFetcher,
    sources: &[Source],
    truncate_width: usize,
) -> Result<Vec<RawRow>> {
    let mut rows: Vec<RawRow> = Vec::new();

    for source in sources {
        info!("Fetching {} via {}", source.name, fetcher.name());
        let text = fetcher.fetch_csv(source)?;
        let parsed = parse_feed(&text, &source.name, truncate_width)?;
        debug!("{}: {} rows", source.name, parsed.len());
        rows.extend(parsed);
    }

    Ok(rows)
}

/// Parse one CSV export into tagged, width-limited rows.
///
/// Rows whose kept cells are all blank are skipped, so notes beyond the
/// width never turn an empty row into a record.
pub fn parse_feed(text: &str, entity_name: &str, truncate_width: usize) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let width = truncate_width + 1;
    let mut rows = Vec::new();
    let mut blank = 0usize;

    // The first row holds the sheet's mislabelled header cells.
    for record in reader.records().skip(1) {
        let record = record?;
        if record
            .iter()
            .take(truncate_width)
            .all(|cell| cell.trim().is_empty())
        {
            blank += 1;
            continue;
        }

        let mut fields: Vec<String> = Vec::with_capacity(width);
        fields.push(entity_name.to_string());
        fields.extend(record.iter().take(truncate_width).map(str::to_string));
        fields.resize(width, String::new());

        rows.push(RawRow { fields });
    }

    if blank > 0 {
        debug!("{}: skipped {} blank rows", entity_name, blank);
    }

    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
