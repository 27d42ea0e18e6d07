use crate::foundation::error::{ReeltimeError, ReeltimeResult};

pub use kurbo::Vec2;

/// Absolute frame on a composition timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReeltimeResult<Self> {
        if start.0 > end.0 {
            return Err(ReeltimeError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Range covering `[0, len)`.
    pub fn from_len(len: u64) -> Self {
        Self {
            start: FrameIndex(0),
            end: FrameIndex(len),
        }
    }

    /// Whether the range holds no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Whether `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames per `den` seconds.
    pub num: u32,
    /// Must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor.
    pub fn new(num: u32, den: u32) -> ReeltimeResult<Self> {
        if den == 0 {
            return Err(ReeltimeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReeltimeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Re-check invariants on a deserialized value.
    pub fn validate(self) -> ReeltimeResult<()> {
        Self::new(self.num, self.den).map(|_| ())
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds elapsed after `frames` frames.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * f64::from(self.den) / f64::from(self.num)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Convert a canvas-relative offset (`1.0` = one full width/height) into pixels.
    pub fn relative_to_px(self, rel: Vec2) -> Vec2 {
        Vec2::new(rel.x * f64::from(self.width), rel.y * f64::from(self.height))
    }
}

/// Presentation transform of a draw node: translation in pixels plus a uniform scale.
///
/// Scale is applied about the node's own anchor, which the painter resolves from its layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Uniform scale factor, `1.0` when untouched.
    pub scale: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
