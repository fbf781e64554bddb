//! Suppression delay used by hosting controls.
//!
//! Fast operations should never flash a loading state. [`DelayedBusy`] only
//! reports the control as visibly busy once the raw busy flag has stayed set
//! for the configured delay, and drops back immediately when it clears.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::timer::{Scheduler, TimerHandle};

/// Delay most hosting controls use before showing their busy state.
pub const DEFAULT_BUSY_DELAY_MS: u64 = 1_000;

type VisibilityListener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct Shared {
    visible: bool,
    generation: u64,
    listener: Option<VisibilityListener>,
}

fn set_visible(shared: &Rc<RefCell<Shared>>, visible: bool) {
    let listener = {
        let mut state = shared.borrow_mut();
        if state.visible == visible {
            return;
        }
        state.visible = visible;
        state.listener.clone()
    };
    if let Some(listener) = listener {
        listener(visible);
    }
}

pub struct DelayedBusy<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    busy: bool,
    shared: Rc<RefCell<Shared>>,
    pending: Option<Box<dyn TimerHandle>>,
}

impl<S: Scheduler> DelayedBusy<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            busy: false,
            shared: Rc::default(),
            pending: None,
        }
    }

    /// Registers the sink notified whenever visibility flips.
    pub fn on_change(&mut self, listener: impl Fn(bool) + 'static) {
        self.shared.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Feeds the raw busy flag.
    pub fn set_busy(&mut self, busy: bool) {
        if busy == self.busy {
            return;
        }
        self.busy = busy;

        if busy {
            if self.delay.is_zero() {
                set_visible(&self.shared, true);
                return;
            }
            let generation = self.shared.borrow().generation;
            let shared = Rc::downgrade(&self.shared);
            debug!(delay = ?self.delay, "busy reveal scheduled");
            self.pending = Some(self.scheduler.once(
                self.delay,
                Box::new(move || {
                    let Some(shared) = shared.upgrade() else {
                        return;
                    };
                    if shared.borrow().generation == generation {
                        set_visible(&shared, true);
                    }
                }),
            ));
        } else {
            self.shared.borrow_mut().generation += 1;
            self.cancel_pending();
            set_visible(&self.shared, false);
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the hosting control should currently show its busy state.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared.borrow().visible
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    fn cancel_pending(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

impl<S: Scheduler> Drop for DelayedBusy<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn tracked(delay: u64) -> (ManualScheduler, DelayedBusy<ManualScheduler>, Rc<RefCell<Vec<bool>>>) {
        let scheduler = ManualScheduler::new();
        let mut busy = DelayedBusy::new(scheduler.clone(), ms(delay));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        busy.on_change(move |visible| sink.borrow_mut().push(visible));
        (scheduler, busy, changes)
    }

    #[test]
    fn reveals_only_after_delay() {
        let (scheduler, mut busy, changes) = tracked(1_000);
        busy.set_busy(true);

        scheduler.advance(ms(999));
        assert!(!busy.is_visible());
        scheduler.advance(ms(1));
        assert!(busy.is_visible());
        assert_eq!(*changes.borrow(), vec![true]);
    }

    #[test]
    fn fast_operation_never_flickers() {
        let (scheduler, mut busy, changes) = tracked(1_000);
        busy.set_busy(true);
        scheduler.advance(ms(300));
        busy.set_busy(false);
        scheduler.advance(ms(5_000));

        assert!(!busy.is_visible());
        assert!(changes.borrow().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn hides_immediately_when_done() {
        let (scheduler, mut busy, changes) = tracked(200);
        busy.set_busy(true);
        scheduler.advance(ms(500));
        busy.set_busy(false);

        assert!(!busy.is_visible());
        assert_eq!(*changes.borrow(), vec![true, false]);
    }

    #[test]
    fn zero_delay_reveals_at_once() {
        let (scheduler, mut busy, _) = tracked(0);
        busy.set_busy(true);
        assert!(busy.is_visible());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn repeated_busy_does_not_reschedule() {
        let (scheduler, mut busy, _) = tracked(1_000);
        busy.set_busy(true);
        scheduler.advance(ms(600));
        busy.set_busy(true);
        scheduler.advance(ms(400));
        assert!(busy.is_visible());
    }

    #[test]
    fn drop_cancels_pending_reveal() {
        let (scheduler, mut busy, changes) = tracked(1_000);
        busy.set_busy(true);
        drop(busy);
        scheduler.advance(ms(2_000));
        assert_eq!(scheduler.pending(), 0);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn default_delay_is_one_second() {
        let busy = DelayedBusy::new(ManualScheduler::new(), ms(DEFAULT_BUSY_DELAY_MS));
        assert_eq!(busy.delay(), Duration::from_secs(1));
        assert!(!busy.is_busy());
    }
}
