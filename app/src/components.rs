//! Reusable UI components.
//!
//! `button` and `cycling_text` make up the design-system loading button;
//! `scheduler` binds their timers to the browser. `error_template` and
//! `header` belong to the showcase site.

pub mod button;
pub mod cycling_text;
pub mod error_template;
pub mod header;
pub mod scheduler;
