// Strong typing over strings. Newtypes for timestamps and item ids, tagged enums for icons.

use serde::{Deserialize, Serialize};

/// Host clock reading in milliseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Timestamp `ms` milliseconds later. Saturates instead of wrapping.
    pub fn after(&self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Render key for a card. Database ids are numeric and arrive stringified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id.to_string())
    }
}

/// A demo video shown in the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub media_url: String,
}

impl CarouselItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        CarouselItem {
            id: ItemId::new(id),
            title: title.into(),
            category: category.into(),
            media_url: media_url.into(),
        }
    }
}

/// Highest star rating a testimonial can carry.
pub const MAX_RATING: u8 = 5;

/// A client quote shown in the testimonials marquee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: ItemId,
    pub name: String,
    pub brand: String,
    pub quote: String,
    pub rating: u8, // 0-5
}

impl Testimonial {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        quote: impl Into<String>,
        rating: u8,
    ) -> Self {
        Testimonial {
            id: ItemId::new(id),
            name: name.into(),
            brand: brand.into(),
            quote: quote.into(),
            rating: rating.min(MAX_RATING),
        }
    }

    /// Filled flag for each of the five stars.
    pub fn stars(&self) -> [bool; MAX_RATING as usize] {
        let mut stars = [false; MAX_RATING as usize];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = i < self.rating as usize;
        }
        stars
    }

    /// Avatar letter, the first character of the client's name.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// Known icon kinds. The render surface resolves these to its own icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Video,
    Box,
    Camera,
    Target,
    Search,
    TrendingUp,
    Zap,
    DollarSign,
    BarChart,
    Clock,
    Layers,
}

/// A service or benefit card in the static grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCard {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub icon: IconKind,
}

/// Activity of the autoplay state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselStatus {
    /// No items. Navigation is ignored and no timer runs.
    Idle,
    /// Timer armed, focus advances every interval.
    Running,
    /// Timer suspended by hover, touch, or an explicit pause.
    Paused,
}

/// Navigation commands forwarded by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Next,
    Previous,
    JumpTo { index: usize },
    Pause,
    Resume,
}
