//! The cycling text indicator: one dot cycle, one timer, one listener.
//!
//! The indicator owns its timer handle outright. Every path that stops the
//! animation goes through [`CyclingTextIndicator::deactivate`], which `Drop`
//! also calls, so a dropped indicator can never leave a timer behind.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::config::AnimationConfig;
use crate::cycle::{DotCycle, render_frame};
use crate::timer::{Scheduler, TimerHandle};

type FrameListener = Rc<dyn Fn(&str)>;

struct Shared {
    config: AnimationConfig,
    cycle: DotCycle,
    active: bool,
    // Bumped on every (re)start and stop; ticks from older timers are ignored.
    generation: u64,
    listener: Option<FrameListener>,
}

impl Shared {
    fn frame(&self) -> String {
        render_frame(self.config.base_text(), self.cycle.count())
    }
}

/// A self-contained loading-text animation bound to a [`Scheduler`].
pub struct CyclingTextIndicator<S: Scheduler> {
    scheduler: S,
    shared: Rc<RefCell<Shared>>,
    timer: Option<Box<dyn TimerHandle>>,
}

impl<S: Scheduler> CyclingTextIndicator<S> {
    /// Creates an inactive indicator with the default config.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            shared: Rc::new(RefCell::new(Shared {
                config: AnimationConfig::default(),
                cycle: DotCycle::new(AnimationConfig::default().max_dots()),
                active: false,
                generation: 0,
                listener: None,
            })),
            timer: None,
        }
    }

    /// Registers the sink that receives every emitted frame.
    pub fn on_frame(&mut self, listener: impl Fn(&str) + 'static) {
        self.shared.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Starts (or restarts) the animation from frame 0 with `config`.
    pub fn activate(&mut self, config: AnimationConfig) {
        self.stop_timer();

        let generation = {
            let mut shared = self.shared.borrow_mut();
            shared.cycle = DotCycle::new(config.max_dots());
            shared.config = config;
            shared.active = true;
            shared.generation += 1;
            shared.generation
        };

        let (interval, is_static) = {
            let shared = self.shared.borrow();
            (shared.config.frame_interval(), shared.config.is_static())
        };
        debug!(?interval, generation, "loading indicator activated");

        if !is_static {
            let tick = ticker(Rc::downgrade(&self.shared), generation);
            self.timer = Some(self.scheduler.every(interval, Box::new(tick)));
        }

        emit(&self.shared);
    }

    /// Applies a config from a re-render.
    ///
    /// Identical config is ignored. A change limited to the text keeps the
    /// running cycle; any timing change restarts from frame 0.
    pub fn configure(&mut self, config: AnimationConfig) {
        let (active, same, same_timing) = {
            let shared = self.shared.borrow();
            (
                shared.active,
                shared.config == config,
                shared.config.same_timing(&config),
            )
        };

        match (active, same, same_timing) {
            (false, _, _) | (true, false, false) => self.activate(config),
            (true, true, _) => {}
            (true, false, true) => {
                self.shared.borrow_mut().config = config;
                emit(&self.shared);
            }
        }
    }

    /// Stops the animation. Safe to call any number of times.
    pub fn deactivate(&mut self) {
        let was_active = {
            let mut shared = self.shared.borrow_mut();
            let was_active = shared.active;
            shared.active = false;
            shared.generation += 1;
            was_active
        };
        self.stop_timer();
        if was_active {
            debug!("loading indicator deactivated");
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.borrow().active
    }

    /// Whether a timer is currently held. Only ever true while active.
    #[must_use]
    pub const fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn dot_count(&self) -> u32 {
        self.shared.borrow().cycle.count()
    }

    /// The current display frame.
    #[must_use]
    pub fn frame(&self) -> String {
        self.shared.borrow().frame()
    }

    #[must_use]
    pub fn config(&self) -> AnimationConfig {
        self.shared.borrow().config.clone()
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<S: Scheduler> Drop for CyclingTextIndicator<S> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn ticker(shared: Weak<RefCell<Shared>>, generation: u64) -> impl FnMut() + 'static {
    move || {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        {
            let mut state = shared.borrow_mut();
            if !state.active || state.generation != generation {
                return;
            }
            state.cycle.advance();
        }
        emit(&shared);
    }
}

// The listener runs with no borrow held so it may call back into the indicator.
fn emit(shared: &Rc<RefCell<Shared>>) {
    let (frame, listener) = {
        let state = shared.borrow();
        (state.frame(), state.listener.clone())
    };
    if let Some(listener) = listener {
        listener(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ManualScheduler, MockTimerHandle};
    use std::time::Duration;

    fn recording(indicator: &mut CyclingTextIndicator<ManualScheduler>) -> Rc<RefCell<Vec<String>>> {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        indicator.on_frame(move |frame| sink.borrow_mut().push(frame.to_owned()));
        frames
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_frame_is_bare_text() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        let frames = recording(&mut indicator);

        indicator.activate(AnimationConfig::default());

        assert_eq!(*frames.borrow(), vec!["Loading"]);
        assert_eq!(indicator.dot_count(), 0);
        scheduler.advance(ms(499));
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn count_stays_within_bounds() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        indicator.activate(AnimationConfig::new("Working", 100, 3));

        for _ in 0..40 {
            scheduler.advance(ms(100));
            assert!(indicator.dot_count() <= 3);
        }
    }

    #[test]
    fn identical_configure_keeps_cycle_and_timer() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        let frames = recording(&mut indicator);
        indicator.activate(AnimationConfig::default());
        scheduler.advance(ms(1_000));
        assert_eq!(indicator.dot_count(), 2);

        indicator.configure(AnimationConfig::default());
        assert_eq!(indicator.dot_count(), 2);
        assert_eq!(scheduler.pending(), 1);

        // The original timer keeps its phase: next tick is at t=1500.
        scheduler.advance(ms(500));
        assert_eq!(indicator.frame(), "Loading...");
        assert_eq!(frames.borrow().len(), 4);
    }

    #[test]
    fn text_change_keeps_count_and_re_emits() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        let frames = recording(&mut indicator);
        indicator.activate(AnimationConfig::default());
        scheduler.advance(ms(500));

        indicator.configure(AnimationConfig::new("Saving", 500, 4));

        assert_eq!(indicator.dot_count(), 1);
        assert_eq!(frames.borrow().last().map(String::as_str), Some("Saving."));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn timing_change_restarts_from_zero() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        indicator.activate(AnimationConfig::default());
        scheduler.advance(ms(1_500));
        assert_eq!(indicator.dot_count(), 3);

        indicator.configure(AnimationConfig::new("Loading", 200, 4));
        assert_eq!(indicator.dot_count(), 0);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(ms(200));
        assert_eq!(indicator.frame(), "Loading.");
    }

    #[test]
    fn configure_while_inactive_activates() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        indicator.configure(AnimationConfig::default());
        assert!(indicator.is_active());
        assert!(indicator.has_timer());
    }

    #[test]
    fn static_config_schedules_nothing() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        let frames = recording(&mut indicator);
        indicator.activate(AnimationConfig::new("Please wait", 500, 0));

        assert!(!indicator.has_timer());
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(ms(60_000));
        assert_eq!(indicator.frame(), "Please wait");
        assert_eq!(*frames.borrow(), vec!["Please wait"]);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        indicator.activate(AnimationConfig::default());
        indicator.deactivate();
        indicator.deactivate();
        assert!(!indicator.is_active());
        assert!(!indicator.has_timer());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn drop_clears_the_timer() {
        let scheduler = ManualScheduler::new();
        {
            let mut indicator = CyclingTextIndicator::new(scheduler.clone());
            indicator.activate(AnimationConfig::default());
            assert_eq!(scheduler.pending(), 1);
        }
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn listener_may_deactivate_from_a_tick() {
        let scheduler = ManualScheduler::new();
        let indicator = Rc::new(RefCell::new(CyclingTextIndicator::new(scheduler.clone())));
        let stop_at = Rc::new(RefCell::new(Vec::new()));

        {
            let weak = Rc::downgrade(&indicator);
            let seen = Rc::clone(&stop_at);
            indicator.borrow_mut().on_frame(move |frame| {
                seen.borrow_mut().push(frame.to_owned());
                if frame.ends_with("..") {
                    if let Some(indicator) = weak.upgrade() {
                        if let Ok(mut indicator) = indicator.try_borrow_mut() {
                            indicator.deactivate();
                        }
                    }
                }
            });
        }
        indicator.borrow_mut().activate(AnimationConfig::default());
        scheduler.advance(ms(5_000));

        assert_eq!(*stop_at.borrow(), vec!["Loading", "Loading.", "Loading.."]);
        assert!(!indicator.borrow().is_active());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn stale_tick_is_ignored_after_restart() {
        let scheduler = ManualScheduler::new();
        let mut indicator = CyclingTextIndicator::new(scheduler.clone());
        let shared = Rc::downgrade(&indicator.shared);
        indicator.activate(AnimationConfig::default());

        // A tick captured before the restart must not advance the new cycle.
        let mut stale = ticker(shared, 1);
        indicator.activate(AnimationConfig::new("Loading", 300, 4));
        stale();
        assert_eq!(indicator.dot_count(), 0);
    }

    struct OneHandle(RefCell<Option<Box<dyn TimerHandle>>>);

    impl Scheduler for OneHandle {
        fn every(&self, _period: Duration, _tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
            self.0.borrow_mut().take().expect("single timer requested")
        }

        fn once(&self, _delay: Duration, _fire: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
            unreachable!("indicator never schedules one-shot timers")
        }
    }

    #[test]
    fn handle_is_cancelled_exactly_once_on_drop() {
        let mut handle = MockTimerHandle::new();
        handle.expect_cancel().times(1).return_const(());
        let scheduler = OneHandle(RefCell::new(Some(Box::new(handle))));

        let mut indicator = CyclingTextIndicator::new(scheduler);
        indicator.activate(AnimationConfig::default());
        drop(indicator);
    }
}
