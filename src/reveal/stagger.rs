use crate::{
    animation::interpolate::{Curve, InterpolateOptions},
    foundation::error::{ReeltimeError, ReeltimeResult},
};

/// Activates `item_count` items one after another at a fixed frame interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StaggerSequencer {
    intro_delay: u64,
    interval: u64,
    item_count: usize,
}

impl StaggerSequencer {
    /// `interval` must be > 0.
    pub fn new(intro_delay: u64, interval: u64, item_count: usize) -> ReeltimeResult<Self> {
        if interval == 0 {
            return Err(ReeltimeError::invalid_timeline(
                "stagger interval must be > 0",
            ));
        }
        let span = interval.checked_mul(item_count.saturating_sub(1) as u64);
        if span.and_then(|s| intro_delay.checked_add(s)).is_none() {
            return Err(ReeltimeError::invalid_timeline(
                "stagger activation frames overflow",
            ));
        }
        Ok(Self {
            intro_delay,
            interval,
            item_count,
        })
    }

    /// Frames before the first activation.
    pub fn intro_delay(&self) -> u64 {
        self.intro_delay
    }

    /// Frames between consecutive activations.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Number of sequenced items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Frame at which item `index` activates: `intro_delay + index * interval`.
    pub fn activation_frame(&self, index: usize) -> u64 {
        self.intro_delay + index as u64 * self.interval
    }

    /// Signed frames since item `index` activated; negative before activation.
    pub fn elapsed_since_activation(&self, index: usize, frame: u64) -> i64 {
        frame as i64 - self.activation_frame(index) as i64
    }

    /// Activation frame of the final item, `None` with no items.
    pub fn last_activation(&self) -> Option<u64> {
        self.item_count
            .checked_sub(1)
            .map(|last| self.activation_frame(last))
    }

    /// How many items have activated at `frame`.
    pub fn activated_count(&self, frame: u64) -> usize {
        if frame < self.intro_delay {
            return 0;
        }
        let n = (frame - self.intro_delay) / self.interval + 1;
        usize::try_from(n).unwrap_or(usize::MAX).min(self.item_count)
    }
}

/// Default frames the scroll keeps moving after the final activation.
pub const DEFAULT_SETTLE_FRAMES: u64 = 30;

/// Auto-scroll keeping the most recently activated rows inside a fixed window.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollWindow {
    stagger: StaggerSequencer,
    visible_count: usize,
    item_height: f64,
    settle_frames: u64,
    // None when every item fits inside the window.
    curve: Option<Curve>,
}

impl ScrollWindow {
    /// Window showing `visible_count` rows of `item_height` pixels.
    ///
    /// The offset ramps linearly from 0 once the window fills up, reaching its maximum
    /// `settle_frames` after the final activation.
    pub fn new(
        stagger: StaggerSequencer,
        visible_count: usize,
        item_height: f64,
        settle_frames: u64,
    ) -> ReeltimeResult<Self> {
        if visible_count == 0 {
            return Err(ReeltimeError::invalid_timeline(
                "scroll window must show at least one item",
            ));
        }
        if !(item_height.is_finite() && item_height >= 0.0) {
            return Err(ReeltimeError::invalid_range(format!(
                "item height must be finite and >= 0, got {item_height}"
            )));
        }

        let curve = match stagger.last_activation() {
            Some(last) if stagger.item_count > visible_count => {
                let begin = stagger.activation_frame(visible_count - 1);
                let end = last.saturating_add(settle_frames);
                let max = (stagger.item_count - visible_count) as f64 * item_height;
                Some(Curve::linear(
                    begin as f64,
                    end as f64,
                    0.0,
                    max,
                    InterpolateOptions::CLAMP,
                )?)
            }
            _ => None,
        };

        Ok(Self {
            stagger,
            visible_count,
            item_height,
            settle_frames,
            curve,
        })
    }

    /// Sequencer driving the window.
    pub fn stagger(&self) -> &StaggerSequencer {
        &self.stagger
    }

    /// Rows that fit in the window.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Row height in pixels.
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Frames the scroll continues after the final activation.
    pub fn settle_frames(&self) -> u64 {
        self.settle_frames
    }

    /// Vertical scroll offset in pixels, within `[0, max_offset]`.
    pub fn offset(&self, frame: u64) -> f64 {
        self.curve.as_ref().map_or(0.0, |c| c.sample(frame as f64))
    }

    /// `(item_count - visible_count) * item_height`, or 0 when everything fits.
    pub fn max_offset(&self) -> f64 {
        self.stagger.item_count.saturating_sub(self.visible_count) as f64 * self.item_height
    }

    /// Index of the topmost row at least partially inside the window.
    pub fn first_visible(&self, frame: u64) -> usize {
        if self.item_height <= 0.0 {
            return 0;
        }
        let row = (self.offset(frame) / self.item_height).floor() as usize;
        row.min(self.stagger.item_count.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/stagger.rs"]
mod tests;
