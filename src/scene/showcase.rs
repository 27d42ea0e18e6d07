use crate::{
    animation::interpolate::{Curve, InterpolateOptions},
    animation::spring::{Spring, SpringConfig},
    composition::model::{Commit, ShowcaseDef},
    foundation::error::{ReeltimeError, ReeltimeResult},
    reveal::stagger::{ScrollWindow, StaggerSequencer},
    reveal::typing::RevealRamp,
    scene::model::{DrawNode, Scene, SceneCtx},
};

/// Frames from the last activation to the call to action.
pub const CTA_AFTER_LAST_ACTIVATION: u64 = 75;

const SIDEBAR_WIDTH: f64 = 260.0;
const TYPING_START: i64 = 5;
const TYPING_END: i64 = 35;

#[derive(Debug)]
/// One page whose feed types in commits at a fixed interval, scrolls to keep the newest rows in
/// view and ends on a call-to-action card.
pub struct CommitShowcaseScene {
    duration: u64,
    commits: Vec<Commit>,
    typing: Vec<RevealRamp>,
    stagger: StaggerSequencer,
    scroll: ScrollWindow,
    cta_start: u64,
    page_fade: Curve,
    sidebar: Spring,
    content: Spring,
    row_slide: Spring,
    row_opacity: Curve,
    cta_opacity: Curve,
    cta_scale: Spring,
}

impl CommitShowcaseScene {
    /// Build every curve and sequencer up front; invalid timing fails here.
    pub fn new(def: &ShowcaseDef) -> ReeltimeResult<Self> {
        let stagger = StaggerSequencer::new(def.intro_delay, def.interval, def.commits.len())?;
        let scroll =
            ScrollWindow::new(stagger, def.visible_count, def.item_height, def.settle_frames)?;
        let typing = def
            .commits
            .iter()
            .map(|c| RevealRamp::new(c.message.chars().count(), TYPING_START, TYPING_END))
            .collect::<ReeltimeResult<Vec<_>>>()?;

        let cta_start = stagger
            .last_activation()
            .unwrap_or(def.intro_delay)
            .checked_add(CTA_AFTER_LAST_ACTIVATION)
            .ok_or_else(|| ReeltimeError::invalid_timeline("call-to-action start overflows"))?;
        let cta_at = cta_start as f64;

        Ok(Self {
            duration: def.duration_frames()?,
            commits: def.commits.clone(),
            typing,
            stagger,
            scroll,
            cta_start,
            page_fade: Curve::linear(0.0, 15.0, 0.0, 1.0, InterpolateOptions::CLAMP_RIGHT)?,
            sidebar: Spring::new(SpringConfig::with_damping(20.0))?.between(-SIDEBAR_WIDTH, 0.0),
            content: Spring::new(SpringConfig::with_damping(15.0))?.delayed(5.0),
            row_slide: Spring::new(SpringConfig::new(15.0, 120.0))?.between(20.0, 0.0),
            row_opacity: Curve::linear(0.0, 10.0, 0.0, 1.0, InterpolateOptions::CLAMP_RIGHT)?,
            cta_opacity: Curve::linear(cta_at, cta_at + 20.0, 0.0, 1.0, InterpolateOptions::CLAMP)?,
            cta_scale: Spring::new(SpringConfig::new(12.0, 100.0))?
                .delayed(cta_at)
                .between(0.8, 1.0),
        })
    }

    /// Frame at which the call to action appears.
    pub fn cta_start(&self) -> u64 {
        self.cta_start
    }

    /// Activation schedule of the feed.
    pub fn stagger(&self) -> &StaggerSequencer {
        &self.stagger
    }

    /// Scroll window of the feed.
    pub fn scroll(&self) -> &ScrollWindow {
        &self.scroll
    }

    fn push_row(&self, ctx: &SceneCtx, index: usize, out: &mut Vec<DrawNode>) {
        let elapsed = self.stagger.elapsed_since_activation(index, ctx.local_frame.0);
        let commit = &self.commits[index];
        let ramp = &self.typing[index];
        let e = elapsed as f64;
        let id = format!("page/content/feed/commit-{index}");

        let y = index as f64 * self.scroll.item_height() + self.row_slide.value(e, ctx.fps);
        out.push(
            DrawNode::new(id.as_str())
                .translate(0.0, y)
                .opacity(self.row_opacity.sample(e))
                .text(ramp.reveal_text(&commit.message, elapsed))
                .caret(ramp.caret_visible(elapsed)),
        );
        out.push(DrawNode::new("type").text(commit.kind.as_str()).nested_in(&id));
        let meta = match &commit.repo {
            Some(repo) => format!("{repo} {}", commit.short_hash()),
            None => commit.short_hash().to_string(),
        };
        out.push(DrawNode::new("meta").text(meta).nested_in(&id));
    }
}

impl Scene for CommitShowcaseScene {
    fn duration_frames(&self) -> u64 {
        self.duration
    }

    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>) {
        let frame = ctx.local_frame.0;
        let f = ctx.frame_f64();

        out.push(DrawNode::new("page").opacity(self.page_fade.sample(f)));
        out.push(DrawNode::new("page/sidebar").translate(self.sidebar.value(f, ctx.fps), 0.0));
        let c = self.content.progress(f, ctx.fps);
        out.push(
            DrawNode::new("page/content")
                .scale(0.95 + 0.05 * c)
                .opacity(c),
        );
        out.push(DrawNode::new("page/content/feed").translate(0.0, -self.scroll.offset(frame)));

        // Rows scrolled past the window are not emitted.
        let activated = self.stagger.activated_count(frame);
        let first = self.scroll.first_visible(frame);
        let window_end = first
            .saturating_add(self.scroll.visible_count())
            .saturating_add(1);
        let last = activated.min(window_end);
        for index in first..last {
            self.push_row(ctx, index, out);
        }

        if frame >= self.cta_start {
            out.push(DrawNode::new("cta").opacity(self.cta_opacity.sample(f)));
            out.push(DrawNode::new("cta/card").scale(self.cta_scale.value(f, ctx.fps)));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/showcase.rs"]
mod tests;
