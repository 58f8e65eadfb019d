//! Time-based animation helpers for the public page.
//!
//! Everything here is advanced explicitly with a frame delta, so tests can
//! step time deterministically.

use rand::Rng;
use std::time::Duration;

use crate::constants::{loader, motion};

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// No easing
    Linear,
    /// Fast start, long settle: `1 - (1-t)^4`
    Power4Out,
    /// Symmetric cubic, used for smooth scrolling
    InOutCubic,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power4Out => 1.0 - (1.0 - t).powi(4),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// A 0..1 progress animation with an optional start delay.
#[derive(Debug, Clone)]
pub struct Tween {
    duration: f32,
    delay: f32,
    ease: Ease,
    time: f32,
    pending_delay: f32,
    direction: Option<Direction>,
}

impl Tween {
    /// Stopped tween lasting `duration` seconds.
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration: duration.max(f32::EPSILON),
            delay: 0.0,
            ease,
            time: 0.0,
            pending_delay: 0.0,
            direction: None,
        }
    }

    /// Wait `delay` seconds before a forward play starts moving.
    #[must_use]
    pub const fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Run forwards; the delay applies when starting from the beginning.
    pub fn play(&mut self) {
        if self.time <= 0.0 {
            self.pending_delay = self.delay;
        }
        self.direction = Some(Direction::Forward);
    }

    /// Run backwards towards the start, without delay.
    pub fn reverse(&mut self) {
        self.pending_delay = 0.0;
        self.direction = Some(Direction::Backward);
    }

    /// Advance by `dt`, stopping at either end.
    pub fn advance(&mut self, dt: Duration) {
        let mut dt = dt.as_secs_f32();
        match self.direction {
            Some(Direction::Forward) => {
                let waited = dt.min(self.pending_delay);
                self.pending_delay -= waited;
                dt -= waited;
                self.time = (self.time + dt).min(self.duration);
                if self.time >= self.duration {
                    self.direction = None;
                }
            }
            Some(Direction::Backward) => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.direction = None;
                }
            }
            None => {}
        }
    }

    /// Eased progress.
    pub fn progress(&self) -> f32 {
        self.ease.apply(self.time / self.duration)
    }

    /// Whether the tween is moving in either direction.
    pub fn is_running(&self) -> bool {
        self.direction.is_some()
    }

    /// Whether a forward play reached the end.
    pub fn is_complete(&self) -> bool {
        self.time >= self.duration
    }
}

/// An element that animates in from an offset below its resting place,
/// fading in as it goes.
#[derive(Debug, Clone)]
pub struct Reveal {
    /// Starting offset in page pixels
    offset: f32,
    tween: Tween,
    armed: bool,
}

impl Reveal {
    /// Reveal that rises `offset` pixels over `duration` seconds after `delay`.
    pub fn new(offset: f32, duration: f32, delay: f32) -> Self {
        Self {
            offset,
            tween: Tween::new(duration, Ease::Power4Out).with_delay(delay),
            armed: false,
        }
    }

    /// Jump to the hidden start state without playing.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Arm and play.
    pub fn play(&mut self) {
        self.armed = true;
        self.tween.play();
    }

    /// Animate back towards the hidden state.
    pub fn reverse(&mut self) {
        self.tween.reverse();
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.tween.advance(dt);
    }

    /// 0 is invisible, 1 fully shown. Elements never armed are shown.
    pub fn opacity(&self) -> f32 {
        if self.armed {
            self.tween.progress()
        } else {
            1.0
        }
    }

    /// Rows the element is currently pushed down by.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rows_down(&self) -> u16 {
        let pixels = self.offset * (1.0 - self.opacity());
        (pixels / motion::PIXELS_PER_ROW).round().max(0.0) as u16
    }

    /// Not moving.
    pub fn is_settled(&self) -> bool {
        !self.armed || self.tween.is_complete()
    }
}

/// What a scroll trigger asks its animation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Animate in
    Play,
    /// Animate back out
    Reverse,
}

/// Fires when a section's top crosses the viewport centre: play on the way
/// down, reverse on the way back up.
#[derive(Debug, Clone, Default)]
pub struct ScrollTrigger {
    active: bool,
}

impl ScrollTrigger {
    /// Compare the section top (document rows) with the viewport centre.
    pub fn update(&mut self, section_top: f32, scroll: f32, viewport_height: f32) -> Option<TriggerAction> {
        let centre = viewport_height.mul_add(0.5, scroll);
        if !self.active && section_top <= centre {
            self.active = true;
            Some(TriggerAction::Play)
        } else if self.active && section_top > centre {
            self.active = false;
            Some(TriggerAction::Reverse)
        } else {
            None
        }
    }

    /// Whether the section top is above the viewport centre.
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Loader overlay phase.
#[derive(Debug, Clone)]
pub enum LoaderPhase {
    /// Progress still climbing
    Loading,
    /// Full; fading out
    Fading(Tween),
    /// Gone
    Hidden,
}

/// Simulated loading progress: random steps on a fixed tick until full,
/// then a fade-out.
#[derive(Debug, Clone)]
pub struct Loader {
    progress: f32,
    tick: Duration,
    since_tick: Duration,
    phase: LoaderPhase,
}

impl Loader {
    /// Loader stepping every `tick`.
    pub const fn new(tick: Duration) -> Self {
        Self {
            progress: 0.0,
            tick,
            since_tick: Duration::ZERO,
            phase: LoaderPhase::Loading,
        }
    }

    /// Advance time. Returns `true` on the frame progress reaches 100.
    pub fn advance<R: Rng>(&mut self, dt: Duration, rng: &mut R) -> bool {
        match &mut self.phase {
            LoaderPhase::Loading => {
                self.since_tick += dt;
                while self.since_tick >= self.tick {
                    self.since_tick -= self.tick;
                    self.progress += rng.gen_range(0.0..loader::MAX_STEP);
                    if self.progress > 100.0 {
                        self.progress = 100.0;
                        let mut fade = Tween::new(loader::FADE.as_secs_f32(), Ease::Linear);
                        fade.play();
                        self.phase = LoaderPhase::Fading(fade);
                        return true;
                    }
                }
                false
            }
            LoaderPhase::Fading(fade) => {
                fade.advance(dt);
                if fade.is_complete() {
                    self.phase = LoaderPhase::Hidden;
                }
                false
            }
            LoaderPhase::Hidden => false,
        }
    }

    /// Progress in percent.
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Overlay opacity: 1 while loading, fading to 0.
    pub fn opacity(&self) -> f32 {
        match &self.phase {
            LoaderPhase::Loading => 1.0,
            LoaderPhase::Fading(fade) => 1.0 - fade.progress(),
            LoaderPhase::Hidden => 0.0,
        }
    }

    /// Whether the overlay still covers the page.
    pub const fn is_visible(&self) -> bool {
        !matches!(self.phase, LoaderPhase::Hidden)
    }

    /// Still before the fade.
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, LoaderPhase::Loading)
    }
}

/// Page scroll position with eased jumps to anchors.
#[derive(Debug, Clone, Default)]
pub struct Scroller {
    offset: f32,
    max: f32,
    glide: Option<(f32, f32, Tween)>,
}

impl Scroller {
    /// Current offset in document rows.
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest reachable offset; the current offset is clamped to it.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Immediate scroll by `delta` rows, cancelling any glide.
    pub fn scroll_by(&mut self, delta: f32) {
        self.glide = None;
        self.offset = (self.offset + delta).clamp(0.0, self.max);
    }

    /// Glide to `target` rows.
    pub fn scroll_to(&mut self, target: f32) {
        let target = target.clamp(0.0, self.max);
        let mut tween = Tween::new(motion::SCROLL_SECONDS, Ease::InOutCubic);
        tween.play();
        self.glide = Some((self.offset, target, tween));
    }

    /// Advance any glide by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        if let Some((from, to, tween)) = &mut self.glide {
            tween.advance(dt);
            self.offset = (*to - *from).mul_add(tween.progress(), *from);
            if tween.is_complete() {
                self.offset = *to;
                self.glide = None;
            }
        }
    }

    /// Whether an eased jump is under way.
    pub const fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: Duration = Duration::from_millis(100);

    #[test]
    fn power4_out_is_front_loaded() {
        assert!(Ease::Power4Out.apply(0.0).abs() < f32::EPSILON);
        assert!((Ease::Power4Out.apply(1.0) - 1.0).abs() < f32::EPSILON);
        assert!(Ease::Power4Out.apply(0.25) > 0.6);
        assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tween_waits_out_its_delay() {
        let mut tween = Tween::new(1.0, Ease::Linear).with_delay(0.3);
        tween.play();
        tween.advance(Duration::from_millis(300));
        assert!(tween.progress().abs() < 1e-6);
        tween.advance(Duration::from_millis(500));
        assert!((tween.progress() - 0.5).abs() < 1e-3);
        tween.advance(Duration::from_secs(2));
        assert!(tween.is_complete());
        assert!(!tween.is_running());
    }

    #[test]
    fn reveal_hides_only_once_armed() {
        let mut reveal = Reveal::new(100.0, 1.0, 0.0);
        assert!((reveal.opacity() - 1.0).abs() < f32::EPSILON);
        assert_eq!(reveal.rows_down(), 0);

        reveal.play();
        assert!(reveal.opacity().abs() < f32::EPSILON);
        assert_eq!(reveal.rows_down(), 4);

        for _ in 0..10 {
            reveal.advance(FRAME);
        }
        assert!(reveal.is_settled());
        assert_eq!(reveal.rows_down(), 0);

        reveal.reverse();
        for _ in 0..10 {
            reveal.advance(FRAME);
        }
        assert!(reveal.opacity().abs() < f32::EPSILON);
    }

    #[test]
    fn scroll_trigger_plays_then_reverses() {
        let mut trigger = ScrollTrigger::default();
        // Section at row 50, viewport 40 rows: centre reaches it at scroll 30.
        assert_eq!(trigger.update(50.0, 0.0, 40.0), None);
        assert_eq!(trigger.update(50.0, 30.0, 40.0), Some(TriggerAction::Play));
        assert_eq!(trigger.update(50.0, 45.0, 40.0), None);
        assert_eq!(trigger.update(50.0, 10.0, 40.0), Some(TriggerAction::Reverse));
        assert!(!trigger.is_active());
    }

    #[test]
    fn loader_completes_once_and_fades_out() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut loader = Loader::new(Duration::from_millis(500));

        let mut completions = 0;
        let mut last = 0.0;
        for _ in 0..400 {
            if loader.advance(FRAME, &mut rng) {
                completions += 1;
            }
            assert!(loader.progress() >= last, "progress never goes backwards");
            assert!(loader.progress() <= 100.0);
            last = loader.progress();
        }

        assert_eq!(completions, 1);
        assert!((loader.progress() - 100.0).abs() < f32::EPSILON);
        assert!(!loader.is_visible());
    }

    #[test]
    fn loader_steps_only_on_ticks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut loader = Loader::new(Duration::from_millis(500));
        loader.advance(Duration::from_millis(499), &mut rng);
        assert!(loader.progress().abs() < f32::EPSILON);
        assert!(loader.is_loading());
    }

    #[test]
    fn scroller_glides_to_clamped_target() {
        let mut scroller = Scroller::default();
        scroller.set_max(80.0);
        scroller.scroll_to(200.0);
        assert!(scroller.is_gliding());
        scroller.advance(Duration::from_millis(300));
        assert!(scroller.offset() > 0.0 && scroller.offset() < 80.0);
        scroller.advance(Duration::from_millis(400));
        assert!((scroller.offset() - 80.0).abs() < f32::EPSILON);
        assert!(!scroller.is_gliding());

        scroller.scroll_by(-500.0);
        assert!(scroller.offset().abs() < f32::EPSILON);
    }
}
