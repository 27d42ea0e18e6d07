//! Character-by-character reveal driven by elapsed frames.

use crate::foundation::error::{ReeltimeError, ReeltimeResult};

/// Frames the caret stays visible after the ramp completes.
pub const DEFAULT_CARET_LINGER: i64 = 5;

/// Linear reveal of `total_units` units over the elapsed-frame window `[ramp_start, ramp_end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevealRamp {
    /// Units revealed once the ramp ends.
    pub total_units: usize,
    /// Elapsed frame at which the first unit may appear.
    pub ramp_start: i64,
    /// Elapsed frame from which every unit is visible.
    pub ramp_end: i64,
    /// Frames the caret lingers after `ramp_end`.
    #[serde(default = "default_linger")]
    pub caret_linger: i64,
}

fn default_linger() -> i64 {
    DEFAULT_CARET_LINGER
}

impl RevealRamp {
    /// `ramp_end` must be strictly after `ramp_start`.
    pub fn new(total_units: usize, ramp_start: i64, ramp_end: i64) -> ReeltimeResult<Self> {
        let ramp = Self {
            total_units,
            ramp_start,
            ramp_end,
            caret_linger: DEFAULT_CARET_LINGER,
        };
        ramp.validate()?;
        Ok(ramp)
    }

    /// Same ramp with a different caret linger.
    pub fn with_caret_linger(mut self, frames: i64) -> Self {
        self.caret_linger = frames.max(0);
        self
    }

    /// Re-check invariants on a deserialized value.
    pub fn validate(&self) -> ReeltimeResult<()> {
        if self.ramp_end <= self.ramp_start {
            return Err(ReeltimeError::invalid_range(format!(
                "reveal ramp must end after it starts ({}..{})",
                self.ramp_start, self.ramp_end
            )));
        }
        Ok(())
    }

    /// Revealed units `elapsed` frames after activation, monotonic and within `[0, total_units]`.
    pub fn visible_unit_count(&self, elapsed: i64) -> usize {
        if elapsed <= self.ramp_start {
            return 0;
        }
        if elapsed >= self.ramp_end {
            return self.total_units;
        }
        // floor(total * (e - start) / (end - start)) in exact integer arithmetic.
        let num = self.total_units as u128 * (elapsed - self.ramp_start) as u128;
        let den = (self.ramp_end - self.ramp_start) as u128;
        (num / den) as usize
    }

    /// Whether every unit is shown.
    pub fn is_complete(&self, elapsed: i64) -> bool {
        self.visible_unit_count(elapsed) == self.total_units
    }

    /// The caret shows strictly between `ramp_start` and `ramp_end + caret_linger`.
    pub fn caret_visible(&self, elapsed: i64) -> bool {
        self.ramp_start < elapsed && elapsed < self.ramp_end.saturating_add(self.caret_linger)
    }

    /// Prefix of `text` revealed at `elapsed`, cut on a char boundary.
    ///
    /// Units count chars; `total_units` should match `text.chars().count()`.
    pub fn reveal_text<'a>(&self, text: &'a str, elapsed: i64) -> &'a str {
        let n = self.visible_unit_count(elapsed);
        match text.char_indices().nth(n) {
            Some((byte, _)) => &text[..byte],
            None => text,
        }
    }
}

/// One-shot form of [`RevealRamp::visible_unit_count`].
pub fn visible_unit_count(
    total_units: usize,
    ramp_start: i64,
    ramp_end: i64,
    elapsed: i64,
) -> ReeltimeResult<usize> {
    Ok(RevealRamp::new(total_units, ramp_start, ramp_end)?.visible_unit_count(elapsed))
}

/// Caret blink phase: on for the first half of every `period` frames.
pub fn caret_blink_on(elapsed: i64, period: i64) -> bool {
    if period <= 1 {
        return true;
    }
    elapsed.rem_euclid(period) < period / 2
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/typing.rs"]
mod tests;
