//! Reveal sequence state machine
//!
//! Counts threshold crossings and, once enough have happened, walks through
//! a fixed timeline:
//!
//! ```text
//! Idle → WormRevealed → WormGrowing → SliderEaten → TitleRevealed → Resetting → Idle
//! ```
//!
//! The machine never reads a clock. Callers pass `now` into
//! [`Choreography::register_crossings`] and [`Choreography::advance`], and react
//! to the returned [`Cue`]s by starting the matching animations.

use std::time::{Duration, Instant};

use super::settings::{ChoreographySettings, RetriggerPolicy};

/// Stage of the reveal sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    /// Worm is mounted but still at zero scale
    WormRevealed,
    /// Worm scaled up to full size
    WormGrowing,
    /// Slider shrinking to nothing
    SliderEaten,
    /// Title shown, worm shrinking away
    TitleRevealed,
    /// Everything fading back to the idle look
    Resetting,
}

impl Stage {
    /// Visibility flags the view should show for this stage
    pub fn flags(self) -> StageFlags {
        match self {
            Stage::Idle => StageFlags::default(),
            Stage::WormRevealed => StageFlags {
                worm_visible: true,
                ..StageFlags::default()
            },
            Stage::WormGrowing => StageFlags {
                worm_visible: true,
                worm_scale: 1.0,
                ..StageFlags::default()
            },
            Stage::SliderEaten => StageFlags {
                worm_visible: true,
                worm_scale: 1.0,
                slider_eaten: true,
                title_visible: false,
            },
            Stage::TitleRevealed => StageFlags {
                worm_visible: true,
                worm_scale: 0.0,
                slider_eaten: true,
                title_visible: true,
            },
            Stage::Resetting => StageFlags::default(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::WormRevealed => "worm revealed",
            Stage::WormGrowing => "worm growing",
            Stage::SliderEaten => "slider eaten",
            Stage::TitleRevealed => "title revealed",
            Stage::Resetting => "resetting",
        }
    }
}

/// Target values of the animated view state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageFlags {
    pub worm_visible: bool,
    pub worm_scale: f32,
    pub slider_eaten: bool,
    pub title_visible: bool,
}

/// A stage entered during a call, with the moment it was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub stage: Stage,
    pub at: Instant,
}

/// Counts crossings towards the reveal threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdCounter {
    count: u32,
    threshold: u32,
}

impl ThresholdCounter {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Add one crossing; true exactly when the count lands on the threshold
    pub fn increment(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.count == self.threshold
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Stage durations resolved from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub reveal_delay: Duration,
    pub grow_delay: Duration,
    pub eat: Duration,
    pub title_delay: Duration,
    pub title: Duration,
    pub reset: Duration,
}

impl Timeline {
    pub fn from_settings(settings: &ChoreographySettings) -> Self {
        Self {
            reveal_delay: settings.reveal_delay(),
            grow_delay: settings.grow_delay(),
            eat: settings.eat(),
            title_delay: settings.title_delay(),
            title: settings.title(),
            reset: settings.reset(),
        }
    }

    /// How long `stage` lasts before the next one starts
    pub fn hold(&self, stage: Stage) -> Option<Duration> {
        match stage {
            Stage::Idle => None,
            Stage::WormRevealed => Some(self.reveal_delay),
            Stage::WormGrowing => Some(self.grow_delay),
            // The title waits for the eat animation to finish, then the delay
            Stage::SliderEaten => Some(self.eat + self.title_delay),
            Stage::TitleRevealed => Some(self.title),
            Stage::Resetting => Some(self.reset),
        }
    }
}

fn next_stage(stage: Stage) -> Stage {
    match stage {
        Stage::Idle => Stage::Idle,
        Stage::WormRevealed => Stage::WormGrowing,
        Stage::WormGrowing => Stage::SliderEaten,
        Stage::SliderEaten => Stage::TitleRevealed,
        Stage::TitleRevealed => Stage::Resetting,
        Stage::Resetting => Stage::Idle,
    }
}

/// The reveal sequence
#[derive(Debug, Clone)]
pub struct Choreography {
    stage: Stage,
    entered_at: Option<Instant>,
    counter: ThresholdCounter,
    timeline: Timeline,
    retrigger: RetriggerPolicy,
}

impl Choreography {
    pub fn new(settings: &ChoreographySettings) -> Self {
        Self {
            stage: Stage::Idle,
            entered_at: None,
            counter: ThresholdCounter::new(settings.crossings_to_reveal),
            timeline: Timeline::from_settings(settings),
            retrigger: settings.retrigger,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn flags(&self) -> StageFlags {
        self.stage.flags()
    }

    pub fn counter(&self) -> u32 {
        self.counter.count()
    }

    /// True while a sequence is in flight
    pub fn is_running(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// When the current stage ends, if it ends on its own
    pub fn next_deadline(&self) -> Option<Instant> {
        let entered = self.entered_at?;
        self.timeline.hold(self.stage).map(|hold| entered + hold)
    }

    /// Record threshold crossings reported by the drag tracker
    ///
    /// Returns the cue for the worm reveal when the counter lands on the
    /// threshold.
    pub fn register_crossings(&mut self, crossings: u32, now: Instant) -> Option<Cue> {
        let mut cue = None;

        for _ in 0..crossings {
            if self.is_running() && self.retrigger == RetriggerPolicy::Ignore {
                tracing::debug!("Crossing ignored, sequence in {}", self.stage.name());
                break;
            }

            let reached = self.counter.increment();
            tracing::debug!("Threshold crossing, counter = {}", self.counter.count());

            if reached {
                if self.is_running() {
                    tracing::info!("Threshold reached again, restarting sequence");
                } else {
                    tracing::info!("Threshold reached, revealing worm");
                }
                cue = Some(self.enter(Stage::WormRevealed, now));
            }
        }

        cue
    }

    /// Enter every stage whose start time has passed
    ///
    /// Stages are entered at their scheduled instant rather than `now`, so a
    /// late tick does not stretch the timeline.
    pub fn advance(&mut self, now: Instant) -> Vec<Cue> {
        let mut cues = Vec::new();

        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }
            let cue = self.enter(next_stage(self.stage), deadline);
            cues.push(cue);
        }

        cues
    }

    /// Abort any running sequence and start over
    pub fn cancel(&mut self) {
        if self.is_running() {
            tracing::info!("Sequence cancelled in {}", self.stage.name());
        }
        self.stage = Stage::Idle;
        self.entered_at = None;
        self.counter.reset();
    }

    fn enter(&mut self, stage: Stage, at: Instant) -> Cue {
        tracing::info!("Sequence: {} -> {}", self.stage.name(), stage.name());

        self.stage = stage;
        match stage {
            Stage::Idle => self.entered_at = None,
            Stage::TitleRevealed => {
                self.counter.reset();
                self.entered_at = Some(at);
            }
            _ => self.entered_at = Some(at),
        }

        Cue { stage, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::clock::{Clock, ManualClock};

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    fn choreography(retrigger: RetriggerPolicy) -> Choreography {
        Choreography::new(&ChoreographySettings {
            retrigger,
            ..ChoreographySettings::default()
        })
    }

    fn trigger(c: &mut Choreography, clock: &ManualClock) -> Option<Cue> {
        let mut cue = None;
        for _ in 0..3 {
            cue = c.register_crossings(1, clock.now()).or(cue);
        }
        cue
    }

    mod property_counter {
        use super::*;

        #[test]
        fn fires_exactly_on_threshold() {
            let mut counter = ThresholdCounter::new(3);
            assert!(!counter.increment());
            assert!(!counter.increment());
            assert!(counter.increment());
            assert!(!counter.increment());
            assert_eq!(counter.count(), 4);

            counter.reset();
            assert_eq!(counter.count(), 0);
        }

        #[test]
        fn zero_threshold_behaves_as_one() {
            let mut counter = ThresholdCounter::new(0);
            assert!(counter.increment());
        }
    }

    mod property_sequence {
        use super::*;

        #[test]
        fn third_crossing_reveals_worm() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);

            assert!(c.register_crossings(1, clock.now()).is_none());
            assert!(c.register_crossings(1, clock.now()).is_none());
            assert!(!c.flags().worm_visible);

            let cue = c.register_crossings(1, clock.now());
            assert_eq!(cue.map(|c| c.stage), Some(Stage::WormRevealed));
            assert!(c.flags().worm_visible);
            assert_eq!(c.flags().worm_scale, 0.0);
        }

        #[test]
        fn burst_of_crossings_reveals_once() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);

            let cue = c.register_crossings(5, clock.now());
            assert_eq!(cue.map(|c| c.stage), Some(Stage::WormRevealed));
            assert_eq!(c.counter(), 3);
        }

        #[test]
        fn stages_follow_the_timeline() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            trigger(&mut c, &clock);

            clock.advance(secs(2.9));
            assert!(c.advance(clock.now()).is_empty());
            assert_eq!(c.stage(), Stage::WormRevealed);

            clock.advance(secs(0.2));
            let cues = c.advance(clock.now());
            assert_eq!(cues.len(), 1);
            assert_eq!(c.stage(), Stage::WormGrowing);
            assert_eq!(c.flags().worm_scale, 1.0);

            clock.advance(secs(3.0));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::SliderEaten);
            assert!(c.flags().slider_eaten);
            assert!(!c.flags().title_visible);

            // Eat animation (4) plus delay (5)
            clock.advance(secs(8.5));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::SliderEaten);

            clock.advance(secs(0.5));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::TitleRevealed);
            assert!(c.flags().title_visible);
            assert_eq!(c.counter(), 0);
            assert_eq!(c.flags().worm_scale, 0.0);

            clock.advance(secs(10.0));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::Resetting);
            assert_eq!(c.flags(), StageFlags::default());

            clock.advance(secs(10.0));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::Idle);
            assert!(!c.is_running());
        }

        #[test]
        fn late_tick_catches_up_in_order() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            let start = trigger(&mut c, &clock).map(|cue| cue.at);

            clock.advance(secs(15.0));
            let cues = c.advance(clock.now());
            let stages: Vec<Stage> = cues.iter().map(|cue| cue.stage).collect();
            assert_eq!(
                stages,
                vec![Stage::WormGrowing, Stage::SliderEaten, Stage::TitleRevealed]
            );

            // Scheduled instants, not the tick time
            let start = start.unwrap();
            assert_eq!(cues[0].at, start + secs(3.0));
            assert_eq!(cues[1].at, start + secs(6.0));
            assert_eq!(cues[2].at, start + secs(15.0));
            assert!(c.flags().title_visible);
            assert_eq!(c.counter(), 0);
        }

        #[test]
        fn full_cycle_returns_to_idle_flags() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            trigger(&mut c, &clock);

            clock.advance(secs(60.0));
            let cues = c.advance(clock.now());
            assert_eq!(cues.last().map(|cue| cue.stage), Some(Stage::Idle));
            assert_eq!(c.flags(), Stage::Idle.flags());
            assert_eq!(c.counter(), 0);
            assert_eq!(c.next_deadline(), None);
        }

        #[test]
        fn idle_advance_is_a_no_op() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            clock.advance(secs(100.0));
            assert!(c.advance(clock.now()).is_empty());
            assert_eq!(c.stage(), Stage::Idle);
        }
    }

    mod property_retrigger {
        use super::*;

        #[test]
        fn ignore_policy_drops_crossings_while_running() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            trigger(&mut c, &clock);

            clock.advance(secs(1.0));
            for _ in 0..5 {
                assert!(c.register_crossings(1, clock.now()).is_none());
            }
            assert_eq!(c.counter(), 3);
            assert_eq!(c.stage(), Stage::WormRevealed);
        }

        #[test]
        fn ignore_policy_counts_again_after_idle() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            trigger(&mut c, &clock);
            clock.advance(secs(60.0));
            c.advance(clock.now());

            assert!(trigger(&mut c, &clock).is_some());
            assert_eq!(c.stage(), Stage::WormRevealed);
        }

        #[test]
        fn restart_policy_restarts_on_next_threshold() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Restart);
            trigger(&mut c, &clock);

            clock.advance(secs(16.0));
            c.advance(clock.now());
            assert_eq!(c.stage(), Stage::TitleRevealed);
            assert_eq!(c.counter(), 0);

            let cue = trigger(&mut c, &clock);
            assert_eq!(cue.map(|c| c.stage), Some(Stage::WormRevealed));
            assert_eq!(c.next_deadline(), Some(clock.now() + secs(3.0)));
        }

        #[test]
        fn cancel_returns_to_idle() {
            let clock = ManualClock::new();
            let mut c = choreography(RetriggerPolicy::Ignore);
            trigger(&mut c, &clock);
            clock.advance(secs(4.0));
            c.advance(clock.now());

            c.cancel();
            assert_eq!(c.stage(), Stage::Idle);
            assert_eq!(c.counter(), 0);
            clock.advance(secs(60.0));
            assert!(c.advance(clock.now()).is_empty());
        }
    }
}
