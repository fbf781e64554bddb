//! Timer abstraction shared by the indicator and the busy delay.
//!
//! Both state machines own at most one [`TimerHandle`] at a time and cancel it
//! synchronously. Hosts supply a [`Scheduler`] backed by their event loop; the
//! [`ManualScheduler`] here drives simulated time.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Owned handle to a scheduled timer.
#[cfg_attr(test, mockall::automock)]
pub trait TimerHandle {
    /// Stops the timer. Calling it more than once is a no-op.
    fn cancel(&mut self);
}

/// Source of repeating and one-shot timers on a single-threaded event loop.
pub trait Scheduler {
    /// Calls `tick` every `period` until the returned handle is cancelled.
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle>;

    /// Calls `fire` once after `delay` unless the returned handle is
    /// cancelled first.
    fn once(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> Box<dyn TimerHandle>;
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        (**self).every(period, tick)
    }

    fn once(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        (**self).once(delay, fire)
    }
}

enum Callback {
    Repeating(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    due: Duration,
    period: Option<Duration>,
    // Taken out while the callback runs so no borrow is held across it.
    callback: Option<Callback>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, Entry>,
}

impl Clock {
    fn insert(&mut self, entry: Entry) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert(id, entry);
        id
    }

    fn next_due(&self, until: Duration) -> Option<(u64, Duration)> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.callback.is_some() && entry.due <= until)
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, entry)| (*id, entry.due))
    }
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Clones share one clock. Timers due at the same instant fire in the order
/// they were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of live (uncancelled, unfired) timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// Moves simulated time forward by `by`, firing every timer that comes
    /// due along the way in order.
    pub fn advance(&self, by: Duration) {
        let until = self.clock.borrow().now + by;

        loop {
            let next = self.clock.borrow().next_due(until);
            let Some((id, due)) = next else { break };

            let callback = {
                let mut clock = self.clock.borrow_mut();
                clock.now = due;
                let callback = clock.timers.get_mut(&id).and_then(|entry| entry.callback.take());
                callback
            };

            match callback {
                Some(Callback::Once(fire)) => {
                    self.clock.borrow_mut().timers.remove(&id);
                    fire();
                }
                Some(Callback::Repeating(mut tick)) => {
                    tick();
                    let mut clock = self.clock.borrow_mut();
                    // The tick may have cancelled its own timer.
                    if let Some(entry) = clock.timers.get_mut(&id) {
                        if let Some(period) = entry.period {
                            entry.due += period;
                        }
                        entry.callback = Some(Callback::Repeating(tick));
                    }
                }
                None => {}
            }
        }

        self.clock.borrow_mut().now = until;
    }

    fn handle(&self, id: u64) -> Box<dyn TimerHandle> {
        Box::new(ManualTimer {
            clock: Rc::downgrade(&self.clock),
            id,
        })
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let period = period.max(Duration::from_millis(1));
        let id = {
            let mut clock = self.clock.borrow_mut();
            let due = clock.now + period;
            clock.insert(Entry {
                due,
                period: Some(period),
                callback: Some(Callback::Repeating(tick)),
            })
        };
        self.handle(id)
    }

    fn once(&self, delay: Duration, fire: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        let id = {
            let mut clock = self.clock.borrow_mut();
            let due = clock.now + delay;
            clock.insert(Entry {
                due,
                period: None,
                callback: Some(Callback::Once(fire)),
            })
        };
        self.handle(id)
    }
}

struct ManualTimer {
    clock: Weak<RefCell<Clock>>,
    id: u64,
}

impl TimerHandle for ManualTimer {
    fn cancel(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().timers.remove(&self.id);
        }
    }
}
