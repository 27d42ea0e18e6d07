use rayon::prelude::*;

use crate::{
    audio::mix::{AudioCue, SoundBank, build_audio_manifest, mix_manifest, showcase_cues},
    audio::synth::AudioBuffer,
    composition::model::CompositionDef,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{ReeltimeError, ReeltimeResult},
    scene::announcement::announcement_timeline,
    scene::model::{DrawModel, DrawNode, Scene, SceneCtx},
    scene::showcase::CommitShowcaseScene,
    timeline::schedule::{Schedule, Timeline, TimelineItem},
};

/// A validated, scheduled composition ready to be sampled frame by frame.
///
/// Building does all validation; [`Composition::render`] only fails for out-of-range frames.
#[derive(Debug)]
pub struct Composition {
    fps: Fps,
    canvas: Canvas,
    timeline: Timeline<Box<dyn Scene>>,
    cues: Vec<AudioCue>,
}

impl Composition {
    #[tracing::instrument(skip(def))]
    /// Validate `def`, build its scenes and schedule them.
    pub fn build(def: &CompositionDef) -> ReeltimeResult<Self> {
        def.validate()?;
        let (timeline, cues) = match def {
            CompositionDef::UpdatesAnnouncement(a) => (announcement_timeline(a)?, Vec::new()),
            CompositionDef::CommitShowcase(s) => {
                let scene = CommitShowcaseScene::new(s)?;
                let cues = if s.audio {
                    showcase_cues(scene.stagger(), scene.cta_start())
                } else {
                    Vec::new()
                };
                let item = TimelineItem::new("showcase", scene.duration_frames());
                let scene: Box<dyn Scene> = Box::new(scene);
                (Timeline::new(vec![(item, scene)])?, cues)
            }
        };

        tracing::debug!(
            clips = timeline.len(),
            duration = timeline.total_duration(),
            cues = cues.len(),
            "built composition"
        );
        Ok(Self {
            fps: def.fps(),
            canvas: def.canvas(),
            timeline,
            cues,
        })
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Total length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.timeline.total_duration()
    }

    /// Placement of every scene.
    pub fn schedule(&self) -> &Schedule {
        self.timeline.schedule()
    }

    /// Sound placements, empty when the composition has no soundtrack.
    pub fn audio_cues(&self) -> &[AudioCue] {
        &self.cues
    }

    #[tracing::instrument(skip(self))]
    /// Draw model of one frame.
    ///
    /// Each visible scene contributes a root node named after its clip, carrying the transition
    /// presentation, followed by the scene's own nodes nested under it.
    pub fn render(&self, frame: FrameIndex) -> ReeltimeResult<DrawModel> {
        if frame.0 >= self.duration_frames() {
            return Err(ReeltimeError::validation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0,
                self.duration_frames()
            )));
        }

        let mut nodes = Vec::new();
        let mut scratch = Vec::new();
        for active in self.timeline.active_at(frame) {
            let root = active.clip.name.as_str();
            let offset = self.canvas.relative_to_px(active.presentation.offset);
            nodes.push(
                DrawNode::new(root)
                    .opacity(active.presentation.opacity)
                    .translate(offset.x, offset.y),
            );

            let ctx = SceneCtx {
                local_frame: active.local_frame,
                fps: self.fps,
                canvas: self.canvas,
            };
            scratch.clear();
            active.payload.sample(&ctx, &mut scratch);
            nodes.extend(scratch.drain(..).map(|n| n.nested_in(root)));
        }

        Ok(DrawModel {
            frame,
            width: self.canvas.width,
            height: self.canvas.height,
            nodes,
        })
    }

    /// Draw models for every frame of `range`, sampled in parallel and returned in frame order.
    pub fn render_frames(&self, range: FrameRange) -> ReeltimeResult<Vec<DrawModel>> {
        if range.end.0 > self.duration_frames() {
            return Err(ReeltimeError::validation(format!(
                "frame range {}..{} exceeds duration {}",
                range.start.0,
                range.end.0,
                self.duration_frames()
            )));
        }
        (range.start.0..range.end.0)
            .into_par_iter()
            .map(|f| self.render(FrameIndex(f)))
            .collect()
    }

    /// Generate and mix the soundtrack over the whole composition.
    ///
    /// Returns `None` when there are no cues. Sounds that fail to generate are left out.
    pub fn render_soundtrack(&self) -> ReeltimeResult<Option<AudioBuffer>> {
        if self.cues.is_empty() {
            return Ok(None);
        }
        let duration = self.duration_frames();
        let bank = SoundBank::prepare(self.fps.frames_to_secs(duration as f64));
        let manifest =
            build_audio_manifest(&self.cues, &bank, self.fps, FrameRange::from_len(duration))?;
        Ok(Some(mix_manifest(&manifest)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/render.rs"]
mod tests;
