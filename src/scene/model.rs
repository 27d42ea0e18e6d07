use crate::foundation::core::{Canvas, Fps, FrameIndex, Transform2D, Vec2};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Presentation state of one visual element at one frame.
///
/// Ids are `/`-separated paths; a child's transform is relative to its parent.
pub struct DrawNode {
    /// Stable path-like identifier.
    pub id: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in pixels plus uniform scale.
    pub transform: Transform2D,
    /// Text revealed so far, for text elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Whether a typing caret is drawn after the text.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub caret: bool,
}

impl DrawNode {
    /// Fully opaque, untransformed node.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            opacity: 1.0,
            transform: Transform2D::default(),
            text: None,
            caret: false,
        }
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Add a translation in pixels.
    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.transform.translate += Vec2::new(x, y);
        self
    }

    /// Multiply the scale.
    pub fn scale(mut self, s: f64) -> Self {
        self.transform.scale *= s;
        self
    }

    /// Attach text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Show or hide the typing caret.
    pub fn caret(mut self, on: bool) -> Self {
        self.caret = on;
        self
    }

    /// Re-root this node under `parent`.
    pub fn nested_in(mut self, parent: &str) -> Self {
        self.id = format!("{parent}/{}", self.id);
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a painter needs for one output frame, in paint order.
pub struct DrawModel {
    /// Composition frame.
    pub frame: FrameIndex,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Nodes, parents before their children.
    pub nodes: Vec<DrawNode>,
}

impl DrawModel {
    /// Node with the given id.
    pub fn node(&self, id: &str) -> Option<&DrawNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Clone, Copy, Debug)]
/// Sampling inputs handed to a scene.
pub struct SceneCtx {
    /// Frame relative to the scene start.
    pub local_frame: FrameIndex,
    /// Composition frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
}

impl SceneCtx {
    /// Local frame as a float, for curve sampling.
    pub fn frame_f64(&self) -> f64 {
        self.local_frame.0 as f64
    }
}

/// A pure function from local frame to draw nodes.
///
/// All curves are validated when the scene is built, so sampling never fails.
pub trait Scene: Send + Sync + std::fmt::Debug {
    /// Intrinsic length in frames.
    fn duration_frames(&self) -> u64;

    /// Append this scene's nodes at `ctx.local_frame`.
    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
