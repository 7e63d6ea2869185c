use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One harvested catalog entry.
///
/// Field values are kept as the raw text or attribute strings found in the
/// card; numeric parsing and normalization are downstream concerns. Every
/// `None` serializes as an explicit `null` so fixed-schema consumers see the
/// same columns on every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Last path segment of the canonical link; absent when the link itself
    /// could not be extracted.
    pub id: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub parking: Option<String>,
    /// Canonical absolute URL of the listing detail page.
    pub link: Option<String>,
    /// Calendar date of the crawl run, identical for every record in one run.
    pub captured_at: NaiveDate,
}

/// Per-run counters, finalized once the crawl loop ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRunSummary {
    pub pages_visited: u32,
    pub records_extracted: u64,
}
