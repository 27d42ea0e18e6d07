//! Reeltime is the timing engine behind short programmatic update videos.
//!
//! Every scene is a pure function of a frame number: interpolation and spring curves turn the
//! frames elapsed since some activation into presentation values (opacity, translation, scale,
//! revealed characters), and a root timeline places scenes back to back with overlapping
//! transitions. Painting pixels is left to an external renderer that consumes the per-frame
//! [`DrawModel`].
//!
//! # Pipeline overview
//!
//! 1. **Declare**: JSON -> [`CompositionDef`] (showcase feed or slide announcement)
//! 2. **Build**: [`Composition::build`] validates curves, schedules scenes ([`schedule`]) and
//!    places audio cues. All timing errors surface here.
//! 3. **Sample**: `Composition + FrameIndex -> DrawModel`, in any order, any number of times
//! 4. **Soundtrack** (optional): generated tones mixed at their cue frames into an [`AudioBuffer`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stateless sampling**: springs and ramps are closed-form, so seeking needs no history.
//! - **Fail at build time**: sampling an in-range frame cannot fail.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod audio;
mod composition;
mod effects;
mod foundation;
mod reveal;
mod scene;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interpolate::{Curve, Extrapolate, InterpolateOptions, interpolate};
pub use animation::spring::{Spring, SpringConfig, measure_spring, spring_value};
pub use audio::mix::{
    AMBIENT_DUCK_FRAMES, AMBIENT_DUCKED_VOLUME, AMBIENT_VOLUME, AudioCue, AudioManifest,
    AudioSegment, CueVolume, POP_VOLUME, Sound, SoundBank, WHOOSH_VOLUME, build_audio_manifest,
    frame_to_sample, mix_manifest, showcase_cues,
};
pub use audio::synth::{
    AudioBuffer, CHANNELS, MAX_TONE_SECS, SAMPLE_RATE, generate_ambient_tone, generate_pop_tone,
    generate_whoosh_tone,
};
pub use composition::model::{
    AnnouncementDef, Commit, CommitCategory, CompositionDef, ShowcaseDef,
};
pub use composition::render::Composition;
pub use effects::transitions::{
    Presentation, SlideDirection, TransitionEdge, TransitionKind, TransitionSpec,
    parse_transition_kind,
};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Transform2D, Vec2};
pub use foundation::error::{ReeltimeError, ReeltimeResult};
pub use reveal::stagger::{DEFAULT_SETTLE_FRAMES, ScrollWindow, StaggerSequencer};
pub use reveal::typing::{
    DEFAULT_CARET_LINGER, RevealRamp, caret_blink_on, visible_unit_count,
};
pub use scene::announcement::announcement_timeline;
pub use scene::model::{DrawModel, DrawNode, Scene, SceneCtx};
pub use scene::showcase::{CTA_AFTER_LAST_ACTIVATION, CommitShowcaseScene};
pub use scene::slides::{CategoryScene, CommitScene, IntroScene, OutroScene};
pub use timeline::schedule::{
    ActiveClip, Schedule, ScheduledClip, Timeline, TimelineItem, schedule,
};
