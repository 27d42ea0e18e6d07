use crate::{
    animation::ease::Ease,
    foundation::core::Vec2,
    foundation::error::{ReeltimeError, ReeltimeResult},
};

/// Edge the entering clip slides in from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    /// Enter from the left edge, push the exiting clip to the right.
    FromLeft,
    /// Enter from the right edge, push the exiting clip to the left.
    #[default]
    FromRight,
    /// Enter from the top edge.
    FromTop,
    /// Enter from the bottom edge.
    FromBottom,
}

impl SlideDirection {
    // Unit vector pointing from the canvas toward the edge the clip enters from.
    fn edge(self) -> Vec2 {
        match self {
            Self::FromLeft => Vec2::new(-1.0, 0.0),
            Self::FromRight => Vec2::new(1.0, 0.0),
            Self::FromTop => Vec2::new(0.0, -1.0),
            Self::FromBottom => Vec2::new(0.0, 1.0),
        }
    }
}

/// How two adjacent clips blend while they overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Both clips are drawn unchanged; the entering clip covers the exiting one.
    #[default]
    None,
    /// The entering clip fades in over the exiting one.
    Fade,
    /// The entering clip pushes the exiting one off screen.
    Slide(SlideDirection),
}

/// Which side of a transition a clip is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TransitionEdge {
    /// The later clip, becoming visible.
    Entering,
    /// The earlier clip, leaving.
    Exiting,
}

/// Presentation adjustment applied to a whole clip during a transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Presentation {
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Offset relative to the canvas size (`1.0` = one full width or height).
    pub offset: Vec2,
}

impl Presentation {
    /// No adjustment.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
    };

    /// Stack two adjustments.
    pub fn combine(self, other: Self) -> Self {
        Self {
            opacity: self.opacity * other.opacity,
            offset: self.offset + other.offset,
        }
    }
}

impl TransitionKind {
    /// Presentation of one side of the transition at `progress` in `[0, 1]`.
    pub fn present(self, edge: TransitionEdge, progress: f64) -> Presentation {
        let p = progress.clamp(0.0, 1.0);
        match (self, edge) {
            (Self::None, _) | (Self::Fade, TransitionEdge::Exiting) => Presentation::IDENTITY,
            (Self::Fade, TransitionEdge::Entering) => Presentation {
                opacity: p,
                offset: Vec2::ZERO,
            },
            (Self::Slide(dir), TransitionEdge::Entering) => Presentation {
                opacity: 1.0,
                offset: dir.edge() * (1.0 - p),
            },
            (Self::Slide(dir), TransitionEdge::Exiting) => Presentation {
                opacity: 1.0,
                offset: -dir.edge() * p,
            },
        }
    }
}

/// A transition placed after a timeline item, overlapping it with the next one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Presentation style.
    #[serde(default)]
    pub kind: TransitionKind,
    /// Frames during which both clips are drawn.
    pub overlap_frames: u64,
    /// Timing curve of the transition progress.
    #[serde(default)]
    pub ease: Ease,
}

impl TransitionSpec {
    /// Linear fade over `overlap_frames`.
    pub fn fade(overlap_frames: u64) -> Self {
        Self {
            kind: TransitionKind::Fade,
            overlap_frames,
            ease: Ease::Linear,
        }
    }

    /// Linear slide over `overlap_frames`.
    pub fn slide(direction: SlideDirection, overlap_frames: u64) -> Self {
        Self {
            kind: TransitionKind::Slide(direction),
            overlap_frames,
            ease: Ease::Linear,
        }
    }

    /// Hard cut without overlap.
    pub fn cut() -> Self {
        Self {
            kind: TransitionKind::None,
            overlap_frames: 0,
            ease: Ease::Linear,
        }
    }

    /// Same transition with a different timing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Progress at `offset` frames into the overlap window.
    pub fn progress(&self, offset: u64) -> f64 {
        if self.overlap_frames == 0 {
            return 1.0;
        }
        self.ease
            .apply(offset as f64 / self.overlap_frames as f64)
            .clamp(0.0, 1.0)
    }

    /// Presentation of one side, `offset` frames into the overlap window.
    pub fn present(&self, edge: TransitionEdge, offset: u64) -> Presentation {
        self.kind.present(edge, self.progress(offset))
    }
}

/// Resolve a transition from its textual kind and optional direction.
///
/// Accepts `none`/`cut`, `fade`/`crossfade` and `slide` with `from_left`, `from_right`,
/// `from_top`, `from_bottom` (short aliases `ltr`, `rtl`, `ttb`, `btt` are accepted too).
pub fn parse_transition_kind(
    kind: &str,
    direction: Option<&str>,
) -> ReeltimeResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ReeltimeError::validation("transition kind must be non-empty"));
    }

    match kind.as_str() {
        "none" | "cut" => Ok(TransitionKind::None),
        "fade" | "crossfade" => Ok(TransitionKind::Fade),
        "slide" => {
            let dir = match direction.map(|d| d.trim().to_ascii_lowercase()) {
                None => SlideDirection::FromRight,
                Some(d) => match d.as_str() {
                    "from_left" | "from-left" | "ltr" => SlideDirection::FromLeft,
                    "from_right" | "from-right" | "rtl" => SlideDirection::FromRight,
                    "from_top" | "from-top" | "ttb" => SlideDirection::FromTop,
                    "from_bottom" | "from-bottom" | "btt" => SlideDirection::FromBottom,
                    other => {
                        return Err(ReeltimeError::validation(format!(
                            "unknown slide direction '{other}'"
                        )));
                    }
                },
            };
            Ok(TransitionKind::Slide(dir))
        }
        _ => Err(ReeltimeError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
