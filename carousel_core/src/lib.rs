// carousel_core: landing page carousel engine (Rust/WASM).
// All navigation, autoplay and placement logic lives here; JS forwards input and
// a clock, and paints the frames it gets back.

mod carousel;
mod config;
mod delivery;
mod error;
mod marquee;
mod offset;
mod placement;
mod types;

use wasm_bindgen::prelude::*;

pub use carousel::{
    swipe_direction, Activation, CardFrame, Carousel, Frame, Playback, SwipeDirection,
};
pub use config::{CarouselConfig, MarqueeConfig};
pub use delivery::{parse_rows, BrandRow, DeliveryGate, FetchTicket, TestimonialRow, VideoRow};
pub use error::EngineError;
pub use marquee::{expand, expand_repeated, track_offset_pct, MarqueeTrack, MAX_TRACK_LEN};
pub use offset::{circular_offset, wrap_next, wrap_previous};
pub use placement::{is_rendered, place, Placement, PlacementPolicy, SlotStyle, ViewportClass};
pub use types::*;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// `performance.now()` readings are fractional milliseconds.
fn timestamp(now_ms: f64) -> Timestamp {
    Timestamp::from_millis(now_ms.max(0.0) as u64)
}

/// Carousel engine exposed to JavaScript.
/// Commands mutate state; `frame_json` returns everything needed to paint.
#[wasm_bindgen]
pub struct WasmCarousel {
    inner: Carousel,
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Create a carousel from a JSON `CarouselConfig` and a JSON array of items.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, items_json: &str, now_ms: f64) -> Result<WasmCarousel, JsValue> {
        let config = CarouselConfig::from_json(config_json).map_err(js_error)?;
        let items: Vec<CarouselItem> = serde_json::from_str(items_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid items: {}", e)))?;

        let inner = Carousel::new(config, items, timestamp(now_ms)).map_err(js_error)?;
        Ok(WasmCarousel { inner })
    }

    /// Replace the item list with a JSON array of items.
    pub fn replace_items(&mut self, items_json: &str, now_ms: f64) -> Result<(), JsValue> {
        let items: Vec<CarouselItem> = serde_json::from_str(items_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid items: {}", e)))?;
        self.inner.replace_items(items, timestamp(now_ms));
        Ok(())
    }

    /// Start a fetch and get its ticket. Earlier tickets become stale.
    pub fn begin_fetch(&mut self) -> u64 {
        self.inner.begin_fetch().as_u64()
    }

    /// Deliver `demo_videos` rows for `ticket`. Unparseable rows count as a
    /// failed fetch. Returns whether the item list was replaced.
    pub fn deliver_rows(&mut self, ticket: u64, rows_json: &str, now_ms: f64) -> bool {
        let result = parse_rows::<VideoRow, CarouselItem>(rows_json);
        self.inner
            .complete_fetch(FetchTicket::from_raw(ticket), result, timestamp(now_ms))
    }

    /// Report that the fetch for `ticket` failed. The item list is kept.
    pub fn deliver_failure(&mut self, ticket: u64, message: &str) -> bool {
        let result = Err(EngineError::DataSource(message.to_string()));
        self.inner
            .complete_fetch(FetchTicket::from_raw(ticket), result, Timestamp::default())
    }

    /// Apply a JSON `Command`, e.g. `{"type":"JumpTo","index":2}`.
    pub fn apply(&mut self, command_json: &str, now_ms: f64) -> Result<Option<usize>, JsValue> {
        let command: Command = serde_json::from_str(command_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid command: {}", e)))?;
        Ok(self.inner.apply(command, timestamp(now_ms)))
    }

    pub fn next(&mut self, now_ms: f64) -> Option<usize> {
        self.inner.next(timestamp(now_ms))
    }

    pub fn previous(&mut self, now_ms: f64) -> Option<usize> {
        self.inner.previous(timestamp(now_ms))
    }

    pub fn jump_to(&mut self, index: usize, now_ms: f64) -> Option<usize> {
        self.inner.jump_to(index, timestamp(now_ms))
    }

    /// Pointer entered the carousel.
    pub fn pause(&mut self) {
        self.inner.pause();
    }

    /// Pointer left the carousel.
    pub fn resume(&mut self, now_ms: f64) {
        self.inner.resume(timestamp(now_ms));
    }

    pub fn touch_start(&mut self, x: f32) {
        self.inner.touch_start(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.inner.touch_move(x);
    }

    /// Returns 1 after a swipe to the next card, -1 to the previous, 0 otherwise.
    pub fn touch_end(&mut self, now_ms: f64) -> i32 {
        match self.inner.touch_end(timestamp(now_ms)) {
            Some(SwipeDirection::Next) => 1,
            Some(SwipeDirection::Previous) => -1,
            None => 0,
        }
    }

    /// Card clicked. Returns the JSON `Activation`.
    pub fn activate(&mut self, index: usize, now_ms: f64) -> Result<String, JsValue> {
        let activation = self.inner.activate(index, timestamp(now_ms));
        serde_json::to_string(&activation)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Flip mute on the focused card. Returns the new muted flag.
    pub fn toggle_mute(&mut self) -> Option<bool> {
        self.inner.toggle_mute().map(|p| p.muted)
    }

    /// Drive autoplay from the host's animation loop. Returns how many
    /// advances fired.
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        self.inner
            .tick(timestamp(now_ms))
            .try_into()
            .unwrap_or(u32::MAX)
    }

    /// Current `Frame` as JSON, for a viewport `viewport_width` pixels wide.
    pub fn frame_json(
        &self,
        now_ms: f64,
        viewport_width: f32,
        hovered: Option<usize>,
    ) -> Result<String, JsValue> {
        let viewport =
            ViewportClass::from_width(viewport_width, self.inner.config().narrow_breakpoint_px);
        let frame = self.inner.frame(timestamp(now_ms), viewport, hovered);

        serde_json::to_string(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn status(&self) -> String {
        format!("{:?}", self.inner.status())
    }

    /// The owning view is gone. Pending fetches will be dropped.
    pub fn teardown(&mut self) {
        self.inner.teardown();
    }
}

/// Expand a JSON array of logos into a seamless marquee track.
#[wasm_bindgen]
pub fn expand_marquee_json(items_json: &str, min_count: usize) -> Result<String, JsValue> {
    let items: Vec<serde_json::Value> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid marquee items: {}", e)))?;

    let track = expand(&items, min_count).map_err(js_error)?;
    serde_json::to_string(&track)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check a JSON array of service cards. Unknown icon kinds are rejected;
/// the normalized cards are returned as JSON.
#[wasm_bindgen]
pub fn service_cards_json(cards_json: &str) -> Result<String, JsValue> {
    let cards: Vec<ServiceCard> = serde_json::from_str(cards_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid service cards: {}", e)))?;

    serde_json::to_string(&cards)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Marquee strips (brand logos and testimonials) exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmMarquee {
    config: MarqueeConfig,
    logos: MarqueeTrack,
    testimonials: MarqueeTrack,
}

#[wasm_bindgen]
impl WasmMarquee {
    /// Create from a JSON `MarqueeConfig`; `{}` uses the defaults. Both strips
    /// start moving at `now_ms`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, now_ms: f64) -> Result<WasmMarquee, JsValue> {
        let config = MarqueeConfig::from_json(config_json).map_err(js_error)?;
        let now = timestamp(now_ms);
        Ok(WasmMarquee {
            logos: MarqueeTrack::new(config.logo_period_ms, now),
            testimonials: MarqueeTrack::new(config.testimonial_period_ms, now),
            config,
        })
    }

    /// Map `brands` rows to logo URLs and expand them into a looping track.
    /// An empty result means the strip should not be shown.
    pub fn logo_track_json(&self, rows_json: &str) -> Result<String, JsValue> {
        let logos = parse_rows::<BrandRow, String>(rows_json).map_err(js_error)?;
        let track = expand(&logos, self.config.min_logo_count).map_err(js_error)?;

        serde_json::to_string(&track)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Map `testimonials` rows and expand them into a looping track.
    pub fn testimonial_track_json(&self, rows_json: &str) -> Result<String, JsValue> {
        let testimonials =
            parse_rows::<TestimonialRow, Testimonial>(rows_json).map_err(js_error)?;
        let track =
            expand_repeated(&testimonials, self.config.testimonial_repeats).map_err(js_error)?;

        serde_json::to_string(&track)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Translate of the logo track in percent at `now_ms`.
    pub fn logo_offset_pct(&self, now_ms: f64) -> f32 {
        self.logos.offset_pct(timestamp(now_ms))
    }

    /// Translate of the testimonial track in percent at `now_ms`.
    pub fn testimonial_offset_pct(&self, now_ms: f64) -> f32 {
        self.testimonials.offset_pct(timestamp(now_ms))
    }

    /// Pointer entered the logo strip.
    pub fn pause_logos(&mut self, now_ms: f64) {
        self.logos.pause(timestamp(now_ms));
    }

    /// Pointer left the logo strip.
    pub fn resume_logos(&mut self, now_ms: f64) {
        self.logos.resume(timestamp(now_ms));
    }

    /// Pointer entered the testimonial strip.
    pub fn pause_testimonials(&mut self, now_ms: f64) {
        self.testimonials.pause(timestamp(now_ms));
    }

    /// Pointer left the testimonial strip.
    pub fn resume_testimonials(&mut self, now_ms: f64) {
        self.testimonials.resume(timestamp(now_ms));
    }
}

/// Await a hosted-database query (`{ data, error }`) and return its rows as
/// JSON, ready for `deliver_rows`.
#[wasm_bindgen]
pub async fn resolve_rows(query: js_sys::Promise) -> Result<String, JsValue> {
    let response = wasm_bindgen_futures::JsFuture::from(query).await?;

    let error = js_sys::Reflect::get(&response, &JsValue::from_str("error"))?;
    if !error.is_null() && !error.is_undefined() {
        return Err(error);
    }

    let data = js_sys::Reflect::get(&response, &JsValue::from_str("data"))?;
    let json = js_sys::JSON::stringify(&data)?;
    Ok(String::from(json))
}
