//! Accessible output of the indicator.

/// Role announced for the indicator element.
pub const STATUS_ROLE: &str = "status";
/// Live-region politeness so updates never interrupt the user.
pub const POLITE: &str = "polite";

/// Accessibility attributes that hold for one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessibility {
    pub role: &'static str,
    pub live: &'static str,
    pub label: String,
}

impl Accessibility {
    /// The explicit label wins verbatim; otherwise the frame text is the label.
    #[must_use]
    pub fn for_frame(frame: &str, extra_label: Option<&str>) -> Self {
        Self {
            role: STATUS_ROLE,
            live: POLITE,
            label: accessible_label(frame, extra_label).to_owned(),
        }
    }
}

#[must_use]
fn accessible_label<'a>(frame: &'a str, extra_label: Option<&'a str>) -> &'a str {
    extra_label.unwrap_or(frame)
}
