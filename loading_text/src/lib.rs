//! Framework-free core of the terminal-style loading text.
//!
//! The crate owns everything about the animation that does not depend on a
//! rendering framework: option resolution, the dot-count state machine, the
//! activation lifecycle of an indicator, the busy-delay used by hosting
//! controls and the accessibility contract. Timers are reached through the
//! [`Scheduler`] trait so the same state machines run against browser timers
//! or the deterministic [`ManualScheduler`].

pub mod a11y;
pub mod busy;
pub mod config;
pub mod cycle;
pub mod indicator;
pub mod timer;

pub use a11y::Accessibility;
pub use busy::DelayedBusy;
pub use config::{AnimationConfig, ConfigIssue, IndicatorOptions};
pub use cycle::{DotCycle, Frames, render_frame};
pub use indicator::CyclingTextIndicator;
pub use timer::{ManualScheduler, Scheduler, TimerHandle};
