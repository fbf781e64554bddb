//! Dot-count state machine and frame rendering.

const DOT: char = '.';

/// Renders a display frame: the base text followed by `dot_count` periods.
#[must_use]
pub fn render_frame(base_text: &str, dot_count: u32) -> String {
    let dots = dot_count as usize;
    let mut frame = String::with_capacity(base_text.len() + dots);
    frame.push_str(base_text);
    frame.extend(std::iter::repeat(DOT).take(dots));
    frame
}

/// The only mutable animation state: a dot count in `0..=max_dots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotCycle {
    count: u32,
    max_dots: u32,
}

impl DotCycle {
    #[must_use]
    pub const fn new(max_dots: u32) -> Self {
        Self { count: 0, max_dots }
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn max_dots(&self) -> u32 {
        self.max_dots
    }

    /// Advances one tick, wrapping to zero after `max_dots`, and returns the
    /// new count.
    pub fn advance(&mut self) -> u32 {
        self.count = if self.count >= self.max_dots {
            0
        } else {
            self.count + 1
        };
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Lazy, infinite sequence of frames starting at the current count.
    ///
    /// The cycle is copied, so the iterator can be restarted by calling this
    /// again.
    #[must_use]
    pub const fn frames(self, base_text: &str) -> Frames<'_> {
        Frames {
            base_text,
            cycle: self,
            started: false,
        }
    }
}

/// Iterator returned by [`DotCycle::frames`]. Never ends.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    base_text: &'a str,
    cycle: DotCycle,
    started: bool,
}

impl Iterator for Frames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.cycle.advance();
        } else {
            self.started = true;
        }
        Some(render_frame(self.base_text, self.cycle.count()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
