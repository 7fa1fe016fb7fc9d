// Data delivery from the hosted database.
// The host performs the fetch; the engine maps rows and decides whether a result
// may still be applied. Stale results and results arriving after teardown are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{CarouselItem, ItemId, Testimonial, MAX_RATING};

/// Row of the `demo_videos` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub video_url: String,
}

impl From<VideoRow> for CarouselItem {
    fn from(row: VideoRow) -> Self {
        CarouselItem {
            id: ItemId::from(row.id),
            title: row.title,
            category: row.category,
            media_url: row.video_url,
        }
    }
}

/// Row of the `brands` table. `name` holds the logo URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandRow {
    pub name: String,
}

impl From<BrandRow> for String {
    fn from(row: BrandRow) -> Self {
        row.name
    }
}

/// Row of the `testimonials` table. `rating` is a nullable numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialRow {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub quote: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Whole stars for a raw rating. Star `i` is filled when `i < rating`, so a
/// fractional rating fills the next star up. Missing ratings show no stars.
fn star_count(rating: Option<f64>) -> u8 {
    match rating {
        Some(r) if r.is_finite() => r.ceil().clamp(0.0, MAX_RATING as f64) as u8,
        _ => 0,
    }
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        let rating = star_count(row.rating);
        Testimonial::new(row.id.to_string(), row.name, row.brand, row.quote, rating)
    }
}

/// Parse a JSON array of rows and convert each into its domain type.
pub fn parse_rows<R, T>(rows_json: &str) -> Result<Vec<T>, EngineError>
where
    R: DeserializeOwned + Into<T>,
{
    let rows: Vec<R> = serde_json::from_str(rows_json)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Identifies one fetch. Only the most recent ticket may deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn from_raw(raw: u64) -> Self {
        FetchTicket(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Hands out fetch tickets and rejects deliveries that are no longer wanted.
#[derive(Debug, Default)]
pub struct DeliveryGate {
    latest: u64,
    closed: bool,
}

impl DeliveryGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch. Supersedes every ticket issued before.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Check whether a result for `ticket` may be applied.
    pub fn admit(&self, ticket: FetchTicket) -> Result<(), EngineError> {
        if self.closed || ticket.0 != self.latest {
            return Err(EngineError::StaleDelivery {
                ticket: ticket.0,
                current: self.latest,
            });
        }
        Ok(())
    }

    /// Refuse all further deliveries.
    pub fn close(&mut self) {
        self.closed = true;
    }
}
