//! Full-canvas slides of the update announcement: intro, category header, commit card, outro.

use crate::{
    animation::interpolate::{Curve, InterpolateOptions},
    animation::spring::{Spring, SpringConfig},
    foundation::error::ReeltimeResult,
    scene::model::{DrawNode, Scene, SceneCtx},
};

/// Opacity of a progress dot that has not been reached yet.
const DOT_DIM_OPACITY: f64 = 0.3;

/// Pulse period of the outro call to action.
const PULSE_PERIOD: u64 = 30;

fn fade_in(from: f64, to: f64) -> ReeltimeResult<Curve> {
    Curve::linear(from, to, 0.0, 1.0, InterpolateOptions::CLAMP)
}

#[derive(Debug)]
/// Opening title card.
pub struct IntroScene {
    duration: u64,
    title: String,
    subtitle: String,
    logo: Spring,
    title_in: Spring,
    subtitle_opacity: Curve,
}

impl IntroScene {
    /// Logo pops in, title rises after 10 frames, subtitle fades in over frames 20..35.
    pub fn new(
        duration: u64,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> ReeltimeResult<Self> {
        Ok(Self {
            duration,
            title: title.into(),
            subtitle: subtitle.into(),
            logo: Spring::new(SpringConfig::with_damping(12.0))?,
            title_in: Spring::new(SpringConfig::critical())?.delayed(10.0),
            subtitle_opacity: fade_in(20.0, 35.0)?,
        })
    }
}

impl Scene for IntroScene {
    fn duration_frames(&self) -> u64 {
        self.duration
    }

    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>) {
        let f = ctx.frame_f64();
        let mark = self.title.chars().next().map(String::from).unwrap_or_default();
        out.push(
            DrawNode::new("logo")
                .scale(self.logo.value(f, ctx.fps))
                .text(mark),
        );

        let t = self.title_in.progress(f, ctx.fps);
        out.push(
            DrawNode::new("title")
                .translate(0.0, 30.0 * (1.0 - t))
                .opacity(t)
                .text(self.title.as_str()),
        );
        out.push(
            DrawNode::new("subtitle")
                .opacity(self.subtitle_opacity.sample(f))
                .text(self.subtitle.as_str()),
        );
    }
}

#[derive(Debug)]
/// Header introducing one category of commits.
pub struct CategoryScene {
    duration: u64,
    name: String,
    commit_count: usize,
    title: Spring,
    badge: Spring,
}

impl CategoryScene {
    /// Title scales in, the update-count badge rises after 8 frames.
    pub fn new(
        duration: u64,
        name: impl Into<String>,
        commit_count: usize,
    ) -> ReeltimeResult<Self> {
        Ok(Self {
            duration,
            name: name.into(),
            commit_count,
            title: Spring::new(SpringConfig::with_damping(15.0))?,
            badge: Spring::new(SpringConfig::critical())?.delayed(8.0),
        })
    }

    /// `"1 update"`, `"3 updates"`.
    pub fn badge_text(&self) -> String {
        let plural = if self.commit_count == 1 { "" } else { "s" };
        format!("{} update{plural}", self.commit_count)
    }
}

impl Scene for CategoryScene {
    fn duration_frames(&self) -> u64 {
        self.duration
    }

    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>) {
        let f = ctx.frame_f64();
        out.push(
            DrawNode::new("title")
                .scale(self.title.value(f, ctx.fps))
                .text(self.name.as_str()),
        );
        let b = self.badge.progress(f, ctx.fps);
        out.push(
            DrawNode::new("badge")
                .translate(0.0, 20.0 * (1.0 - b))
                .opacity(b)
                .text(self.badge_text()),
        );
    }
}

#[derive(Debug)]
/// Card presenting one commit, with a progress indicator for its category.
pub struct CommitScene {
    duration: u64,
    message: String,
    kind: String,
    // 1-based position within the category.
    position: usize,
    total: usize,
    card: Spring,
    badge: Spring,
    text_opacity: Curve,
}

impl CommitScene {
    /// `position` is 1-based within a category of `total` commits.
    pub fn new(
        duration: u64,
        message: impl Into<String>,
        kind: impl Into<String>,
        position: usize,
        total: usize,
    ) -> ReeltimeResult<Self> {
        Ok(Self {
            duration,
            message: message.into(),
            kind: kind.into(),
            position,
            total,
            card: Spring::new(SpringConfig::with_damping(15.0))?,
            badge: Spring::new(SpringConfig::critical())?.delayed(5.0),
            text_opacity: fade_in(10.0, 20.0)?,
        })
    }
}

impl Scene for CommitScene {
    fn duration_frames(&self) -> u64 {
        self.duration
    }

    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>) {
        let f = ctx.frame_f64();
        out.push(DrawNode::new("card").scale(self.card.value(f, ctx.fps)));

        let b = self.badge.progress(f, ctx.fps);
        out.push(
            DrawNode::new("card/badge")
                .translate(-20.0 * (1.0 - b), 0.0)
                .text(self.kind.as_str()),
        );
        out.push(
            DrawNode::new("card/counter").text(format!("{} / {}", self.position, self.total)),
        );
        out.push(
            DrawNode::new("card/message")
                .opacity(self.text_opacity.sample(f))
                .text(self.message.as_str()),
        );

        out.push(DrawNode::new("dots"));
        out.extend((0..self.total).map(|i| {
            let opacity = if i < self.position {
                1.0
            } else {
                DOT_DIM_OPACITY
            };
            DrawNode::new(format!("dots/dot-{i}")).opacity(opacity)
        }));
    }
}

#[derive(Debug)]
/// Closing card with totals and a pulsing call to action.
pub struct OutroScene {
    duration: u64,
    total_commits: usize,
    cta_label: String,
    title: Spring,
    stats: Spring,
    cta_opacity: Curve,
    pulse: Curve,
}

impl OutroScene {
    /// Checkmark and title pop in, stats rise after 10 frames, the call to action fades in over
    /// frames 25..40 and then pulses every 30 frames.
    pub fn new(
        duration: u64,
        total_commits: usize,
        cta_label: impl Into<String>,
    ) -> ReeltimeResult<Self> {
        Ok(Self {
            duration,
            total_commits,
            cta_label: cta_label.into(),
            title: Spring::new(SpringConfig::with_damping(12.0))?,
            stats: Spring::new(SpringConfig::critical())?.delayed(10.0),
            cta_opacity: fade_in(25.0, 40.0)?,
            pulse: Curve::new(
                vec![0.0, 15.0, PULSE_PERIOD as f64],
                vec![1.0, 1.05, 1.0],
                InterpolateOptions::CLAMP_RIGHT,
            )?,
        })
    }
}

impl Scene for OutroScene {
    fn duration_frames(&self) -> u64 {
        self.duration
    }

    fn sample(&self, ctx: &SceneCtx, out: &mut Vec<DrawNode>) {
        let f = ctx.frame_f64();
        let pop = self.title.value(f, ctx.fps);
        out.push(DrawNode::new("checkmark").scale(pop));
        out.push(DrawNode::new("title").scale(pop).text("That's a wrap!"));

        let s = self.stats.progress(f, ctx.fps);
        out.push(
            DrawNode::new("stats")
                .translate(0.0, 20.0 * (1.0 - s))
                .opacity(s)
                .text(format!("{} updates", self.total_commits)),
        );

        let phase = (ctx.local_frame.0 % PULSE_PERIOD) as f64;
        out.push(
            DrawNode::new("cta")
                .opacity(self.cta_opacity.sample(f))
                .scale(self.pulse.sample(phase))
                .text(self.cta_label.as_str()),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/slides.rs"]
mod tests;
