use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Label shown with zero trailing dots when no text is supplied.
pub const DEFAULT_TEXT: &str = "Loading";
/// Milliseconds between frame advances when no speed is supplied.
pub const DEFAULT_SPEED_MS: u64 = 500;
/// Highest dot count before the cycle wraps when none is supplied.
pub const DEFAULT_MAX_DOTS: u32 = 4;
/// Intervals below this are accepted but reported as hard to read.
pub const MIN_COMFORTABLE_SPEED_MS: u64 = 50;

/// A configuration value that was coerced or flagged while resolving
/// [`IndicatorOptions`].
///
/// None of these are surfaced to callers as failures; they exist so hosts and
/// tests can see what the resolver did.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("text is empty; falling back to {default:?}", default = DEFAULT_TEXT)]
    EmptyText,
    #[error("speed {0}ms is not positive; falling back to {default}ms", default = DEFAULT_SPEED_MS)]
    NonPositiveSpeed(i64),
    #[error("speed {0}ms is below {floor}ms and may be hard to read", floor = MIN_COMFORTABLE_SPEED_MS)]
    IntervalBelowFloor(u64),
    #[error("max dots {0} is negative; clamping to 0")]
    NegativeMaxDots(i64),
}

/// Validated animation settings for one activation of an indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    base_text: String,
    frame_interval: Duration,
    max_dots: u32,
}

impl AnimationConfig {
    /// Builds a config from raw values, coercing invalid ones.
    #[must_use]
    pub fn new(text: impl Into<String>, speed_ms: i64, max_dots: i64) -> Self {
        IndicatorOptions {
            text: Some(text.into()),
            speed: Some(speed_ms),
            max_dots: Some(max_dots),
            extra_label: None,
        }
        .resolve()
    }

    #[must_use]
    pub fn base_text(&self) -> &str {
        &self.base_text
    }

    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    #[must_use]
    pub const fn max_dots(&self) -> u32 {
        self.max_dots
    }

    /// A config with `max_dots == 0` never grows dots.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.max_dots == 0
    }

    /// Whether `other` would tick at the same rate over the same cycle.
    ///
    /// Only a timing change restarts a running indicator.
    #[must_use]
    pub fn same_timing(&self, other: &Self) -> bool {
        self.frame_interval == other.frame_interval && self.max_dots == other.max_dots
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_text: DEFAULT_TEXT.to_owned(),
            frame_interval: Duration::from_millis(DEFAULT_SPEED_MS),
            max_dots: DEFAULT_MAX_DOTS,
        }
    }
}

/// Raw, untrusted indicator options as a host supplies them.
///
/// Field names follow the component's public surface (`text`, `speed`,
/// `maxDots`, `extraLabel`) so the options can be read straight from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorOptions {
    pub text: Option<String>,
    /// Milliseconds per frame.
    pub speed: Option<i64>,
    pub max_dots: Option<i64>,
    /// Overrides the accessible name. Used verbatim when present.
    pub extra_label: Option<String>,
}

impl IndicatorOptions {
    /// Resolves the options into a config, logging every coercion.
    #[must_use]
    pub fn resolve(&self) -> AnimationConfig {
        let (config, issues) = self.resolve_with_issues();
        for issue in &issues {
            warn!(%issue, "loading indicator option adjusted");
        }
        config
    }

    /// Resolves the options and reports what had to be coerced or flagged.
    #[must_use]
    pub fn resolve_with_issues(&self) -> (AnimationConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let base_text = match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_owned(),
            Some(_) => {
                issues.push(ConfigIssue::EmptyText);
                DEFAULT_TEXT.to_owned()
            }
            None => DEFAULT_TEXT.to_owned(),
        };

        let speed_ms = match self.speed {
            Some(speed) if speed > 0 => {
                let speed = speed.unsigned_abs();
                if speed < MIN_COMFORTABLE_SPEED_MS {
                    issues.push(ConfigIssue::IntervalBelowFloor(speed));
                }
                speed
            }
            Some(speed) => {
                issues.push(ConfigIssue::NonPositiveSpeed(speed));
                DEFAULT_SPEED_MS
            }
            None => DEFAULT_SPEED_MS,
        };

        let max_dots = match self.max_dots {
            Some(dots) if dots < 0 => {
                issues.push(ConfigIssue::NegativeMaxDots(dots));
                0
            }
            Some(dots) => u32::try_from(dots).unwrap_or(u32::MAX),
            None => DEFAULT_MAX_DOTS,
        };

        let config = AnimationConfig {
            base_text,
            frame_interval: Duration::from_millis(speed_ms),
            max_dots,
        };
        (config, issues)
    }

    #[must_use]
    pub fn extra_label(&self) -> Option<&str> {
        self.extra_label.as_deref()
    }
}
