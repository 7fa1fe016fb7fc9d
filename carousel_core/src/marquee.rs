// Marquee list expansion for seamless looping tracks.
// The track animates from 0 to -50% of its length, so it must hold two identical
// halves, each wider than the viewport.

use crate::error::EngineError;
use crate::types::Timestamp;

/// Largest track (both halves) the engine will build.
pub const MAX_TRACK_LEN: usize = 10_000;

/// Repeat `source` until it holds at least `min_count` items, then double the
/// result so translating by -50% lands on an identical sequence.
///
/// An empty source yields an empty track.
pub fn expand<T: Clone>(source: &[T], min_count: usize) -> Result<Vec<T>, EngineError> {
    if source.is_empty() {
        return Ok(Vec::new());
    }

    let repeats = min_count.div_ceil(source.len()).max(1);
    expand_repeated(source, repeats)
}

/// Build one half from `repeats` copies of `source` and double it.
pub fn expand_repeated<T: Clone>(source: &[T], repeats: usize) -> Result<Vec<T>, EngineError> {
    let track_len = source
        .len()
        .checked_mul(repeats)
        .and_then(|half| half.checked_mul(2))
        .filter(|&len| len <= MAX_TRACK_LEN)
        .ok_or_else(|| {
            EngineError::InvalidConfig(format!(
                "marquee of {} items x {} repeats exceeds {} items",
                source.len(),
                repeats,
                MAX_TRACK_LEN
            ))
        })?;

    let mut track = Vec::with_capacity(track_len);
    for _ in 0..repeats * 2 {
        track.extend_from_slice(source);
    }
    Ok(track)
}

/// Horizontal translate of a looping track, in percent of its length, after
/// `elapsed_ms`. Travels from 0 toward -50 once per `period_ms`, then restarts.
pub fn track_offset_pct(elapsed_ms: u64, period_ms: u64) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    let phase = (elapsed_ms % period_ms) as f64 / period_ms as f64;
    (-50.0 * phase) as f32
}

/// Animation clock of one marquee strip. Hovering the strip freezes it in
/// place; leaving picks up where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeTrack {
    period_ms: u64,
    /// Travel time of runs that ended before the current one.
    banked_ms: u64,
    /// Start of the current run. `None` while paused.
    running_since: Option<Timestamp>,
}

impl MarqueeTrack {
    /// A track that starts moving at `now`.
    pub fn new(period_ms: u64, now: Timestamp) -> Self {
        MarqueeTrack {
            period_ms,
            banked_ms: 0,
            running_since: Some(now),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    pub fn pause(&mut self, now: Timestamp) {
        if let Some(start) = self.running_since.take() {
            self.banked_ms = self.banked_ms.saturating_add(now.since(start));
        }
    }

    pub fn resume(&mut self, now: Timestamp) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Time the track has spent moving by `now`.
    pub fn elapsed_ms(&self, now: Timestamp) -> u64 {
        match self.running_since {
            Some(start) => self.banked_ms.saturating_add(now.since(start)),
            None => self.banked_ms,
        }
    }

    pub fn offset_pct(&self, now: Timestamp) -> f32 {
        track_offset_pct(self.elapsed_ms(now), self.period_ms)
    }
}
