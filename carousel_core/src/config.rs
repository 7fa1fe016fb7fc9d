// Engine configuration passed from JS as JSON. Every field has a serde default,
// so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::marquee::MAX_TRACK_LEN;
use crate::placement::PlacementPolicy;

/// Carousel behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Autoplay period (milliseconds).
    #[serde(default = "default_autoplay_interval")]
    pub autoplay_interval_ms: u64,
    /// Minimum horizontal travel for a touch to count as a swipe (pixels).
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,
    /// Cards further than this from the focus are not rendered on wide viewports.
    #[serde(default = "default_render_radius")]
    pub render_radius: usize,
    /// Viewports narrower than this collapse to a single stack (pixels).
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f32,
    #[serde(default)]
    pub placement: PlacementPolicy,
}

fn default_autoplay_interval() -> u64 {
    15_000 // 15s
}

fn default_swipe_threshold() -> f32 {
    50.0
}

fn default_render_radius() -> usize {
    2
}

fn default_narrow_breakpoint() -> f32 {
    768.0
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            autoplay_interval_ms: default_autoplay_interval(),
            swipe_threshold_px: default_swipe_threshold(),
            render_radius: default_render_radius(),
            narrow_breakpoint_px: default_narrow_breakpoint(),
            placement: PlacementPolicy::default(),
        }
    }
}

impl CarouselConfig {
    pub fn from_json(config_json: &str) -> Result<Self, EngineError> {
        let config: CarouselConfig = serde_json::from_str(config_json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.autoplay_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "autoplay_interval_ms must be positive".to_string(),
            ));
        }
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "swipe_threshold_px must be a non-negative number, got {}",
                self.swipe_threshold_px
            )));
        }
        if !self.narrow_breakpoint_px.is_finite() || self.narrow_breakpoint_px <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "narrow_breakpoint_px must be positive, got {}",
                self.narrow_breakpoint_px
            )));
        }
        Ok(())
    }
}

/// Marquee strip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Minimum logos in one half of the track.
    #[serde(default = "default_min_logo_count")]
    pub min_logo_count: usize,
    /// Copies of the testimonial set in one half of the track.
    #[serde(default = "default_testimonial_repeats")]
    pub testimonial_repeats: usize,
    /// Time for the logo track to travel one half (milliseconds).
    #[serde(default = "default_logo_period")]
    pub logo_period_ms: u64,
    /// Time for the testimonial track to travel one half (milliseconds).
    #[serde(default = "default_testimonial_period")]
    pub testimonial_period_ms: u64,
}

fn default_min_logo_count() -> usize {
    15 // ~150px per logo, wider than a 1920px screen
}

fn default_testimonial_repeats() -> usize {
    3
}

fn default_logo_period() -> u64 {
    40_000
}

fn default_testimonial_period() -> u64 {
    60_000
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        MarqueeConfig {
            min_logo_count: default_min_logo_count(),
            testimonial_repeats: default_testimonial_repeats(),
            logo_period_ms: default_logo_period(),
            testimonial_period_ms: default_testimonial_period(),
        }
    }
}

impl MarqueeConfig {
    pub fn from_json(config_json: &str) -> Result<Self, EngineError> {
        let config: MarqueeConfig = serde_json::from_str(config_json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let max_half = MAX_TRACK_LEN / 2;
        if self.min_logo_count > max_half {
            return Err(EngineError::InvalidConfig(format!(
                "min_logo_count must be at most {}, got {}",
                max_half, self.min_logo_count
            )));
        }
        if self.testimonial_repeats == 0 || self.testimonial_repeats > max_half {
            return Err(EngineError::InvalidConfig(format!(
                "testimonial_repeats must be in 1..={}, got {}",
                max_half, self.testimonial_repeats
            )));
        }
        if self.logo_period_ms == 0 || self.testimonial_period_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "marquee periods must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
