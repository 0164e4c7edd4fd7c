//! Click-to-position caret model
//!
//! Text is split at the caret into a left and a right segment. Every
//! character on either side, and the caret itself, is an addressable unit;
//! clicking a character puts the caret just after it. Offsets are counted in
//! characters.
//!
//! The model owns no buffer: it borrows the text and reports offsets, and the
//! caller decides what to do with them.

use std::time::Duration;

/// Full blink cycle of the caret
pub const BLINK_PERIOD: Duration = Duration::from_millis(2000);

/// An addressable unit of the split text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorTarget {
    /// The `i`-th character left of the caret
    Left(usize),
    /// The caret itself
    Caret,
    /// The `i`-th character right of the caret
    Right(usize),
}

/// Text split at a caret offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitText<'a> {
    left: &'a str,
    right: &'a str,
    left_len: usize,
    right_len: usize,
}

impl<'a> SplitText<'a> {
    /// Splits `text` at `cursor`, clamping the cursor to the text length
    #[must_use]
    pub fn new(text: &'a str, cursor: usize) -> Self {
        let at = byte_offset(text, cursor);
        let (left, right) = text.split_at(at);
        Self {
            left,
            right,
            left_len: left.chars().count(),
            right_len: right.chars().count(),
        }
    }

    /// Text before the caret
    #[must_use]
    pub const fn left(&self) -> &'a str {
        self.left
    }

    /// Text after the caret
    #[must_use]
    pub const fn right(&self) -> &'a str {
        self.right
    }

    /// Characters before the caret (this is also the caret offset)
    #[must_use]
    pub const fn left_len(&self) -> usize {
        self.left_len
    }

    /// Characters after the caret
    #[must_use]
    pub const fn right_len(&self) -> usize {
        self.right_len
    }

    /// Number of addressable units: every character plus the caret
    #[must_use]
    pub const fn unit_count(&self) -> usize {
        self.left_len + 1 + self.right_len
    }

    /// Caret offset produced by activating `target`
    ///
    /// Indices past the end of their segment are clamped to the segment.
    #[must_use]
    pub fn offset_for(&self, target: CursorTarget) -> usize {
        match target {
            CursorTarget::Left(i) => (i + 1).min(self.left_len),
            CursorTarget::Caret => self.left_len,
            CursorTarget::Right(i) => self.left_len + (i + 1).min(self.right_len),
        }
    }

    /// Units in display order, with the character each one shows
    /// (`None` for the caret)
    pub fn units(&self) -> impl Iterator<Item = (CursorTarget, Option<char>)> + 'a {
        let left = self
            .left
            .chars()
            .enumerate()
            .map(|(i, c)| (CursorTarget::Left(i), Some(c)));
        let right = self
            .right
            .chars()
            .enumerate()
            .map(|(i, c)| (CursorTarget::Right(i), Some(c)));
        left.chain(std::iter::once((CursorTarget::Caret, None)))
            .chain(right)
    }

    /// Returns the unit at display position `index`
    #[must_use]
    pub fn unit_at(&self, index: usize) -> Option<CursorTarget> {
        if index < self.left_len {
            Some(CursorTarget::Left(index))
        } else if index == self.left_len {
            Some(CursorTarget::Caret)
        } else if index < self.unit_count() {
            Some(CursorTarget::Right(index - self.left_len - 1))
        } else {
            None
        }
    }
}

/// Caret opacity `elapsed` into the blink animation: fully opaque for the
/// first half of each period, fully transparent for the second
#[must_use]
pub fn caret_opacity(elapsed: Duration) -> f32 {
    let period = BLINK_PERIOD.as_millis();
    let phase = elapsed.as_millis() % period;
    if phase < period / 2 {
        1.0
    } else {
        0.0
    }
}

/// Whether the caret is drawn at `elapsed`
#[must_use]
pub fn caret_visible(elapsed: Duration) -> bool {
    caret_opacity(elapsed) > 0.0
}

/// Converts a character offset into a byte offset, clamped to the end
#[must_use]
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(byte, _)| byte)
}
