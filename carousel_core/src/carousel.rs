// Carousel controller: item list, focus index, autoplay timer, swipe and playback.
// Single owner, mutated only through &mut self. Time is passed in by the host so
// every transition is deterministic.

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::delivery::{DeliveryGate, FetchTicket};
use crate::error::EngineError;
use crate::offset::{circular_offset, wrap_next, wrap_previous};
use crate::placement::{is_rendered, place, Placement, ViewportClass};
use crate::types::*;

/// Playback state of the focused card's video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playback {
    pub playing: bool,
    pub muted: bool,
}

impl Default for Playback {
    /// A newly focused card autoplays muted.
    fn default() -> Self {
        Playback {
            playing: true,
            muted: true,
        }
    }
}

/// Result of activating (clicking) a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Activation {
    /// A side card was activated and became the focus.
    Navigated { index: usize },
    /// The focused card was activated and its playback toggled.
    PlaybackToggled { playback: Playback },
    /// Nothing to activate.
    Ignored,
}

/// Navigation implied by a finished swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Finger moved left: show the next card.
    Next,
    /// Finger moved right: show the previous card.
    Previous,
}

/// Reduce a touch gesture to a navigation, if it travelled far enough.
pub fn swipe_direction(start_x: f32, end_x: f32, threshold_px: f32) -> Option<SwipeDirection> {
    let distance = start_x - end_x;
    if distance > threshold_px {
        Some(SwipeDirection::Next)
    } else if distance < -threshold_px {
        Some(SwipeDirection::Previous)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SwipeTracker {
    start_x: Option<f32>,
    end_x: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
struct AutoplayTimer {
    armed_at: Timestamp,
    deadline: Timestamp,
}

/// One card of a rendered frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFrame {
    pub index: usize,
    pub id: ItemId,
    pub offset: isize,
    pub placement: Placement,
    pub transform: String,
    pub item: CarouselItem,
}

/// Everything the render surface needs to paint the carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub status: CarouselStatus,
    pub focus: Option<usize>,
    /// Autoplay progress toward the next advance, 0.0-1.0.
    pub progress: f32,
    pub playback: Playback,
    pub cards: Vec<CardFrame>,
}

/// The carousel engine. Owns the item list and all navigation state.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    items: Vec<CarouselItem>,
    /// `None` iff `items` is empty.
    focus: Option<usize>,
    paused: bool,
    /// `Some` iff running: items present, not paused, not torn down.
    timer: Option<AutoplayTimer>,
    swipe: SwipeTracker,
    playback: Playback,
    gate: DeliveryGate,
    torn_down: bool,
}

impl Carousel {
    /// Create a carousel focused on the first item. Autoplay starts at `now`
    /// when the list is non-empty.
    pub fn new(
        config: CarouselConfig,
        items: Vec<CarouselItem>,
        now: Timestamp,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let focus = if items.is_empty() { None } else { Some(0) };
        let mut carousel = Carousel {
            config,
            items,
            focus,
            paused: false,
            timer: None,
            swipe: SwipeTracker::default(),
            playback: Playback::default(),
            gate: DeliveryGate::new(),
            torn_down: false,
        };
        carousel.arm(now);
        Ok(carousel)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_item(&self) -> Option<&CarouselItem> {
        self.focus.and_then(|i| self.items.get(i))
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn status(&self) -> CarouselStatus {
        if self.items.is_empty() || self.torn_down {
            CarouselStatus::Idle
        } else if self.paused {
            CarouselStatus::Paused
        } else {
            CarouselStatus::Running
        }
    }

    /// When the next autoplay advance is due, if the timer is armed.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timer.map(|t| t.deadline)
    }

    /// Apply a navigation command. Returns the focus after the command, or
    /// `None` when the command was ignored.
    pub fn apply(&mut self, command: Command, now: Timestamp) -> Option<usize> {
        match command {
            Command::Next => self.next(now),
            Command::Previous => self.previous(now),
            Command::JumpTo { index } => self.jump_to(index, now),
            Command::Pause => {
                self.pause();
                self.focus
            }
            Command::Resume => {
                self.resume(now);
                self.focus
            }
        }
    }

    pub fn next(&mut self, now: Timestamp) -> Option<usize> {
        let focus = self.active_focus()?;
        let target = wrap_next(focus, self.items.len());
        self.navigate(target, now)
    }

    pub fn previous(&mut self, now: Timestamp) -> Option<usize> {
        let focus = self.active_focus()?;
        let target = wrap_previous(focus, self.items.len());
        self.navigate(target, now)
    }

    /// Focus `index` directly. Out-of-range targets are ignored.
    pub fn jump_to(&mut self, index: usize, now: Timestamp) -> Option<usize> {
        self.active_focus()?;
        if index >= self.items.len() {
            log::debug!(
                "Carousel jump to {} rejected: only {} items",
                index,
                self.items.len()
            );
            return None;
        }
        self.navigate(index, now)
    }

    /// Suspend autoplay. The elapsed part of the interval is discarded.
    pub fn pause(&mut self) {
        if self.torn_down || self.paused {
            return;
        }
        self.paused = true;
        self.timer = None;
    }

    /// Resume autoplay with a fresh full interval from `now`.
    pub fn resume(&mut self, now: Timestamp) {
        if self.torn_down || !self.paused {
            return;
        }
        self.paused = false;
        self.arm(now);
    }

    /// Fire every autoplay advance due by `now`. Returns how many advances fired.
    pub fn tick(&mut self, now: Timestamp) -> u64 {
        let (Some(timer), Some(focus)) = (self.timer, self.focus) else {
            return 0;
        };
        if now < timer.deadline {
            return 0;
        }

        let interval = self.config.autoplay_interval_ms;
        let steps = now.since(timer.deadline) / interval + 1;
        let len = self.items.len();
        let target = (focus + (steps % len as u64) as usize) % len;

        let armed_at = timer.deadline.after((steps - 1).saturating_mul(interval));
        self.timer = Some(AutoplayTimer {
            armed_at,
            deadline: armed_at.after(interval),
        });
        self.set_focus(target);
        steps
    }

    /// Touch began on the carousel: pause and remember where.
    pub fn touch_start(&mut self, x: f32) {
        if self.torn_down {
            return;
        }
        self.pause();
        self.swipe = SwipeTracker {
            start_x: Some(x),
            end_x: None,
        };
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.swipe.start_x.is_some() {
            self.swipe.end_x = Some(x);
        }
    }

    /// Touch ended: resume autoplay, then navigate if the gesture was a swipe.
    /// A release without a recorded touch start changes nothing.
    pub fn touch_end(&mut self, now: Timestamp) -> Option<SwipeDirection> {
        let swipe = std::mem::take(&mut self.swipe);
        let start_x = swipe.start_x?;
        self.resume(now);

        let end_x = swipe.end_x?;
        let direction = swipe_direction(start_x, end_x, self.config.swipe_threshold_px)?;
        match direction {
            SwipeDirection::Next => self.next(now),
            SwipeDirection::Previous => self.previous(now),
        }?;
        Some(direction)
    }

    /// Card clicked. A side card becomes the focus; the focused card toggles
    /// playback, unmuting when it starts playing.
    pub fn activate(&mut self, index: usize, now: Timestamp) -> Activation {
        let Some(focus) = self.active_focus() else {
            return Activation::Ignored;
        };

        if index == focus {
            if self.playback.playing {
                self.playback.playing = false;
            } else {
                self.playback.playing = true;
                self.playback.muted = false;
            }
            return Activation::PlaybackToggled {
                playback: self.playback,
            };
        }

        match self.jump_to(index, now) {
            Some(index) => Activation::Navigated { index },
            None => Activation::Ignored,
        }
    }

    /// Flip the focused card's mute flag.
    pub fn toggle_mute(&mut self) -> Option<Playback> {
        self.active_focus()?;
        self.playback.muted = !self.playback.muted;
        Some(self.playback)
    }

    /// Replace the whole item list. Focus is kept by position and reset to 0
    /// when it no longer fits.
    pub fn replace_items(&mut self, items: Vec<CarouselItem>, now: Timestamp) {
        if self.torn_down {
            return;
        }

        let old_len = self.items.len();
        self.items = items;
        let len = self.items.len();

        if len == 0 {
            self.focus = None;
            self.timer = None;
            log::debug!("Carousel idle: item list is empty");
            return;
        }

        let focus = match self.focus {
            Some(focus) if focus < len => focus,
            _ => 0,
        };
        if self.focus != Some(focus) {
            self.focus = Some(focus);
            self.playback = Playback::default();
        }

        if self.timer.is_none() || len != old_len {
            self.arm(now);
        }
        log::debug!(
            "Carousel items replaced: {} -> {} (focus={})",
            old_len,
            len,
            focus
        );
    }

    /// Apply a data-source result. Failures keep the last-known list.
    pub fn deliver(
        &mut self,
        result: Result<Vec<CarouselItem>, EngineError>,
        now: Timestamp,
    ) -> bool {
        match result {
            Ok(items) => {
                self.replace_items(items, now);
                !self.torn_down
            }
            Err(err) => {
                log::warn!("Carousel keeps {} items after fetch failure: {}", self.items.len(), err);
                false
            }
        }
    }

    /// Start a fetch. Results for earlier tickets will be dropped.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.gate.begin()
    }

    /// Apply the result of the fetch identified by `ticket`, unless it has been
    /// superseded or the carousel was torn down. Returns whether state changed.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<CarouselItem>, EngineError>,
        now: Timestamp,
    ) -> bool {
        if let Err(err) = self.gate.admit(ticket) {
            log::debug!("Carousel dropped delivery: {}", err);
            return false;
        }
        self.deliver(result, now)
    }

    /// Owning view is gone: cancel the timer and ignore everything from now on.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.timer = None;
        self.swipe = SwipeTracker::default();
        self.gate.close();
        log::info!("Carousel torn down with {} items", self.items.len());
    }

    /// Fraction of the autoplay interval elapsed. Full while paused, empty when idle.
    pub fn progress(&self, now: Timestamp) -> f32 {
        match (self.status(), self.timer) {
            (CarouselStatus::Paused, _) => 1.0,
            (CarouselStatus::Running, Some(timer)) => {
                let elapsed = now.since(timer.armed_at) as f32;
                (elapsed / self.config.autoplay_interval_ms as f32).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Placement of every card in the render set. `hovered` is the index of the
    /// card under the pointer, if any.
    pub fn frame(&self, now: Timestamp, viewport: ViewportClass, hovered: Option<usize>) -> Frame {
        let len = self.items.len();
        let policy = &self.config.placement;

        let cards = match self.focus {
            Some(focus) if !self.torn_down => self
                .items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    let offset = circular_offset(index, focus, len);
                    if !is_rendered(offset, viewport, self.config.render_radius) {
                        return None;
                    }
                    let placement = place(offset, viewport, hovered == Some(index), policy);
                    Some(CardFrame {
                        index,
                        id: item.id.clone(),
                        offset,
                        transform: placement.css_transform(policy.perspective_px),
                        placement,
                        item: item.clone(),
                    })
                })
                .collect(),
            _ => Vec::new(),
        };

        Frame {
            status: self.status(),
            focus: self.focus,
            progress: self.progress(now),
            playback: self.playback,
            cards,
        }
    }

    fn active_focus(&self) -> Option<usize> {
        if self.torn_down {
            return None;
        }
        self.focus
    }

    fn navigate(&mut self, target: usize, now: Timestamp) -> Option<usize> {
        self.set_focus(target);
        if self.timer.is_some() {
            self.arm(now);
        }
        Some(target)
    }

    fn set_focus(&mut self, target: usize) {
        if self.focus == Some(target) {
            return;
        }
        log::debug!("Carousel focus {:?} -> {}", self.focus, target);
        self.focus = Some(target);
        self.playback = Playback::default();
    }

    /// Start a full interval at `now` if the carousel may run.
    fn arm(&mut self, now: Timestamp) {
        if self.torn_down || self.paused || self.items.is_empty() {
            self.timer = None;
            return;
        }
        self.timer = Some(AutoplayTimer {
            armed_at: now,
            deadline: now.after(self.config.autoplay_interval_ms),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INTERVAL: u64 = 15_000;

    fn items(n: usize) -> Vec<CarouselItem> {
        (0..n)
            .map(|i| {
                CarouselItem::new(
                    i.to_string(),
                    format!("Ad {}", i),
                    "UGC",
                    format!("https://cdn.example/{}.mp4", i),
                )
            })
            .collect()
    }

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    fn carousel(n: usize) -> Carousel {
        Carousel::new(CarouselConfig::default(), items(n), at(0)).unwrap()
    }

    #[test]
    fn starts_running_on_first_item() {
        let c = carousel(5);
        assert_eq!(c.focus(), Some(0));
        assert_eq!(c.status(), CarouselStatus::Running);
        assert_eq!(c.next_deadline(), Some(at(INTERVAL)));
    }

    #[test]
    fn invalid_config_is_rejected_before_ticking() {
        let config = CarouselConfig {
            autoplay_interval_ms: 0,
            ..Default::default()
        };
        let err = Carousel::new(config, items(3), at(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn empty_carousel_is_idle_and_ignores_navigation() {
        let mut c = carousel(0);
        assert_eq!(c.status(), CarouselStatus::Idle);
        assert_eq!(c.focus(), None);
        assert_eq!(c.next(at(1)), None);
        assert_eq!(c.jump_to(0, at(1)), None);
        assert_eq!(c.tick(at(1_000_000)), 0);
        assert!(c.frame(at(0), ViewportClass::Wide, None).cards.is_empty());
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut c = carousel(3);
        assert_eq!(c.previous(at(1)), Some(2));
        assert_eq!(c.next(at(2)), Some(0));
        assert_eq!(c.next(at(3)), Some(1));
    }

    #[test]
    fn manual_navigation_restarts_autoplay_interval() {
        let mut c = carousel(5);
        c.next(at(10_000));
        assert_eq!(c.next_deadline(), Some(at(10_000 + INTERVAL)));

        // The first deadline passes without an advance.
        assert_eq!(c.tick(at(INTERVAL)), 0);
        assert_eq!(c.focus(), Some(1));
        assert_eq!(c.tick(at(10_000 + INTERVAL)), 1);
        assert_eq!(c.focus(), Some(2));
    }

    #[test]
    fn navigation_while_paused_keeps_timer_off() {
        let mut c = carousel(5);
        c.pause();
        assert_eq!(c.next(at(100)), Some(1));
        assert_eq!(c.status(), CarouselStatus::Paused);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn tick_catches_up_on_missed_intervals() {
        let mut c = carousel(4);
        assert_eq!(c.tick(at(INTERVAL - 1)), 0);
        assert_eq!(c.tick(at(INTERVAL * 3 + 5)), 3);
        assert_eq!(c.focus(), Some(3));
        assert_eq!(c.next_deadline(), Some(at(INTERVAL * 4)));
    }

    #[test]
    fn jump_to_out_of_range_changes_nothing() {
        let mut c = carousel(3);
        c.next(at(5));
        let deadline = c.next_deadline();
        assert_eq!(c.jump_to(3, at(50)), None);
        assert_eq!(c.focus(), Some(1));
        assert_eq!(c.next_deadline(), deadline);
    }

    #[test]
    fn swipe_threshold() {
        assert_eq!(swipe_direction(200.0, 140.0, 50.0), Some(SwipeDirection::Next));
        assert_eq!(swipe_direction(140.0, 200.0, 50.0), Some(SwipeDirection::Previous));
        assert_eq!(swipe_direction(200.0, 170.0, 50.0), None);
        assert_eq!(swipe_direction(200.0, 150.0, 50.0), None);
    }

    #[test]
    fn sixty_pixel_swipe_advances_once() {
        let mut c = carousel(5);
        c.touch_start(200.0);
        assert_eq!(c.status(), CarouselStatus::Paused);
        c.touch_move(170.0);
        c.touch_move(140.0);
        assert_eq!(c.touch_end(at(500)), Some(SwipeDirection::Next));
        assert_eq!(c.focus(), Some(1));
        assert_eq!(c.status(), CarouselStatus::Running);
        assert_eq!(c.next_deadline(), Some(at(500 + INTERVAL)));
    }

    #[test]
    fn short_swipe_only_resumes() {
        let mut c = carousel(5);
        c.touch_start(200.0);
        c.touch_move(170.0);
        assert_eq!(c.touch_end(at(500)), None);
        assert_eq!(c.focus(), Some(0));
        assert_eq!(c.status(), CarouselStatus::Running);
    }

    #[test]
    fn tap_without_move_does_not_navigate() {
        let mut c = carousel(5);
        c.touch_start(200.0);
        assert_eq!(c.touch_end(at(10)), None);
        assert_eq!(c.focus(), Some(0));
    }

    #[test]
    fn stray_touch_end_keeps_hover_pause() {
        let mut c = carousel(5);
        c.pause();
        assert_eq!(c.touch_end(at(100)), None);
        assert_eq!(c.status(), CarouselStatus::Paused);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn pause_suppresses_autoplay_and_resume_starts_full_interval() {
        let mut c = carousel(5);
        assert_eq!(c.tick(at(INTERVAL / 10)), 0);
        c.pause();
        assert_eq!(c.progress(at(INTERVAL / 10)), 1.0);
        assert_eq!(c.tick(at(10_000_000)), 0);
        assert_eq!(c.focus(), Some(0));

        let resumed = 10_000_000;
        c.resume(at(resumed));
        // Leftover 90% from before the pause must not fire early.
        assert_eq!(c.tick(at(resumed + INTERVAL * 9 / 10)), 0);
        assert_eq!(c.focus(), Some(0));
        assert_eq!(c.tick(at(resumed + INTERVAL)), 1);
        assert_eq!(c.focus(), Some(1));
    }

    #[test]
    fn redundant_resume_keeps_deadline() {
        let mut c = carousel(5);
        c.resume(at(7_000));
        assert_eq!(c.next_deadline(), Some(at(INTERVAL)));
    }

    #[test]
    fn shrinking_list_clamps_focus_to_zero() {
        let mut c = carousel(5);
        c.jump_to(4, at(1));
        c.replace_items(items(3), at(2));
        assert_eq!(c.focus(), Some(0));
    }

    #[test]
    fn growing_list_keeps_focus_by_position() {
        let mut c = carousel(3);
        c.jump_to(2, at(1));
        c.replace_items(items(8), at(2));
        assert_eq!(c.focus(), Some(2));
        assert_eq!(c.next_deadline(), Some(at(2 + INTERVAL)));
    }

    #[test]
    fn emptying_list_goes_idle_and_refilling_restarts() {
        let mut c = carousel(3);
        c.replace_items(Vec::new(), at(10));
        assert_eq!(c.status(), CarouselStatus::Idle);
        assert_eq!(c.focus(), None);
        assert_eq!(c.next_deadline(), None);

        c.replace_items(items(2), at(20));
        assert_eq!(c.focus(), Some(0));
        assert_eq!(c.status(), CarouselStatus::Running);
        assert_eq!(c.next_deadline(), Some(at(20 + INTERVAL)));
    }

    #[test]
    fn paused_flag_survives_replacement() {
        let mut c = carousel(3);
        c.pause();
        c.replace_items(items(4), at(10));
        assert_eq!(c.status(), CarouselStatus::Paused);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn failed_delivery_keeps_items() {
        let mut c = carousel(3);
        let applied = c.deliver(Err(EngineError::DataSource("timeout".into())), at(5));
        assert!(!applied);
        assert_eq!(c.items().len(), 3);
    }

    #[test]
    fn stale_and_post_teardown_deliveries_are_dropped() {
        let mut c = carousel(3);
        let stale = c.begin_fetch();
        let fresh = c.begin_fetch();

        assert!(!c.complete_fetch(stale, Ok(items(7)), at(5)));
        assert_eq!(c.items().len(), 3);

        assert!(c.complete_fetch(fresh, Ok(items(6)), at(6)));
        assert_eq!(c.items().len(), 6);

        let late = c.begin_fetch();
        c.teardown();
        assert!(!c.complete_fetch(late, Ok(items(1)), at(7)));
        assert_eq!(c.items().len(), 6);
    }

    #[test]
    fn teardown_cancels_timer_and_ignores_commands() {
        let mut c = carousel(3);
        c.teardown();
        assert!(c.is_torn_down());
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.next(at(1)), None);
        assert_eq!(c.tick(at(INTERVAL * 2)), 0);
        c.resume(at(3));
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn activating_side_card_jumps_and_focused_card_toggles_playback() {
        let mut c = carousel(5);
        assert_eq!(c.activate(4, at(1)), Activation::Navigated { index: 4 });
        assert_eq!(c.focus(), Some(4));

        let paused = Playback {
            playing: false,
            muted: true,
        };
        assert_eq!(c.activate(4, at(2)), Activation::PlaybackToggled { playback: paused });

        let unmuted = Playback {
            playing: true,
            muted: false,
        };
        assert_eq!(c.activate(4, at(3)), Activation::PlaybackToggled { playback: unmuted });
        assert_eq!(c.activate(9, at(4)), Activation::Ignored);
    }

    #[test]
    fn focus_change_resets_playback() {
        let mut c = carousel(3);
        c.toggle_mute();
        assert!(!c.playback().muted);
        c.next(at(1));
        assert_eq!(c.playback(), Playback::default());
    }

    #[test]
    fn progress_tracks_interval() {
        let mut c = carousel(3);
        assert_eq!(c.progress(at(0)), 0.0);
        assert!((c.progress(at(INTERVAL / 2)) - 0.5).abs() < 1e-6);
        c.pause();
        assert_eq!(c.progress(at(INTERVAL / 2)), 1.0);
        assert_eq!(carousel(0).progress(at(5)), 0.0);
    }

    #[test]
    fn wide_frame_renders_only_near_cards() {
        let c = carousel(7);
        let frame = c.frame(at(0), ViewportClass::Wide, Some(0));
        let offsets: Vec<isize> = frame.cards.iter().map(|card| card.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, -2, -1]);

        let focused = &frame.cards[0];
        assert_eq!(focused.placement.scale, 1.05);
        assert!(focused.transform.starts_with("translate(-50%, -50%)"));
    }

    #[test]
    fn narrow_frame_keeps_every_card_but_shows_one() {
        let c = carousel(7);
        let frame = c.frame(at(0), ViewportClass::Narrow, None);
        assert_eq!(frame.cards.len(), 7);
        let visible: Vec<usize> = frame
            .cards
            .iter()
            .filter(|card| card.placement.is_visible())
            .map(|card| card.index)
            .collect();
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn commands_dispatch() {
        let mut c = carousel(4);
        assert_eq!(c.apply(Command::JumpTo { index: 2 }, at(1)), Some(2));
        assert_eq!(c.apply(Command::Pause, at(2)), Some(2));
        assert!(c.is_paused());
        assert_eq!(c.apply(Command::Resume, at(3)), Some(2));
        assert_eq!(c.apply(Command::Previous, at(4)), Some(1));
    }

    fn state_strategy() -> impl Strategy<Value = (usize, usize)> {
        (1usize..50).prop_flat_map(|len| (Just(len), 0..len))
    }

    proptest! {
        /// next followed by previous restores the focus.
        #[test]
        fn next_then_previous_restores_focus((len, focus) in state_strategy()) {
            let mut c = carousel(len);
            c.jump_to(focus, at(1));
            c.next(at(2));
            c.previous(at(3));
            prop_assert_eq!(c.focus(), Some(focus));
        }

        /// Valid jumps land exactly, invalid ones leave the focus alone.
        #[test]
        fn jump_to_lands_or_is_rejected(
            (len, focus) in state_strategy(),
            target in 0usize..100,
        ) {
            let mut c = carousel(len);
            c.jump_to(focus, at(1));
            let result = c.jump_to(target, at(2));
            if target < len {
                prop_assert_eq!(result, Some(target));
                prop_assert_eq!(c.focus(), Some(target));
            } else {
                prop_assert_eq!(result, None);
                prop_assert_eq!(c.focus(), Some(focus));
            }
        }

        /// Shrinking below the focus resets to 0; otherwise the focus is kept.
        #[test]
        fn replacement_clamps_or_preserves(
            (len, focus) in state_strategy(),
            new_len in 1usize..60,
        ) {
            let mut c = carousel(len);
            c.jump_to(focus, at(1));
            c.replace_items(items(new_len), at(2));
            if focus >= new_len {
                prop_assert_eq!(c.focus(), Some(0));
            } else {
                prop_assert_eq!(c.focus(), Some(focus));
            }
        }

        /// While paused, no amount of elapsed time moves the focus.
        #[test]
        fn paused_carousel_never_autoplays(
            (len, focus) in state_strategy(),
            ticks in prop::collection::vec(0u64..100_000_000, 1..20),
        ) {
            let mut c = carousel(len);
            c.jump_to(focus, at(1));
            c.pause();
            for t in ticks {
                prop_assert_eq!(c.tick(at(t)), 0);
            }
            prop_assert_eq!(c.focus(), Some(focus));
        }

        /// Every card of a wide frame lies within the render radius.
        #[test]
        fn wide_frame_respects_render_radius((len, focus) in state_strategy()) {
            let mut c = carousel(len);
            c.jump_to(focus, at(1));
            let frame = c.frame(at(2), ViewportClass::Wide, None);
            for card in &frame.cards {
                prop_assert!(card.offset.unsigned_abs() <= c.config().render_radius);
            }
            prop_assert_eq!(frame.cards.len(), len.min(2 * c.config().render_radius + 1));
        }
    }
}
