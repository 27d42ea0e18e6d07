use std::sync::Arc;

use crate::{
    audio::synth::{
        AudioBuffer, CHANNELS, MAX_TONE_SECS, SAMPLE_RATE, generate_ambient_tone,
        generate_pop_tone, generate_whoosh_tone,
    },
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReeltimeError, ReeltimeResult},
    reveal::stagger::StaggerSequencer,
};

/// Volume of each activation pop.
pub const POP_VOLUME: f32 = 0.5;
/// Volume of the call-to-action whoosh.
pub const WHOOSH_VOLUME: f32 = 0.7;
/// Ambient bed level before ducking.
pub const AMBIENT_VOLUME: f32 = 0.3;
/// Ambient bed level once ducked.
pub const AMBIENT_DUCKED_VOLUME: f32 = 0.1;
/// Frames the ambient bed takes to duck.
pub const AMBIENT_DUCK_FRAMES: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Generated sound played by a cue.
pub enum Sound {
    /// [`generate_pop_tone`].
    Pop,
    /// [`generate_whoosh_tone`].
    Whoosh,
    /// [`generate_ambient_tone`], rendered to the composition length.
    Ambient,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Gain of a cue over its own local frames.
pub enum CueVolume {
    /// Fixed gain.
    Constant(f32),
    /// `base` until `duck_start`, then a linear ramp to `ducked` over `duck_frames`.
    Ducked {
        /// Gain before ducking.
        base: f32,
        /// Gain after ducking.
        ducked: f32,
        /// Local frame at which ducking starts.
        duck_start: u64,
        /// Length of the ramp.
        duck_frames: u64,
    },
}

impl CueVolume {
    /// Gain at a (fractional) frame relative to the cue start.
    pub fn at(&self, local_frame: f64) -> f32 {
        match *self {
            Self::Constant(v) => v,
            Self::Ducked {
                base,
                ducked,
                duck_start,
                duck_frames,
            } => {
                let start = duck_start as f64;
                if local_frame < start {
                    return base;
                }
                if duck_frames == 0 {
                    return ducked;
                }
                let t = ((local_frame - start) / duck_frames as f64).clamp(0.0, 1.0) as f32;
                base + (ducked - base) * t
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A sound placed on the composition timeline.
pub struct AudioCue {
    /// What to play.
    pub sound: Sound,
    /// Composition frame at which playback starts.
    pub start: FrameIndex,
    /// Gain envelope.
    pub volume: CueVolume,
}

/// Cues for a staggered commit feed: one pop per activation, a whoosh at the call to action
/// and an ambient bed that ducks as the call to action approaches.
pub fn showcase_cues(stagger: &StaggerSequencer, cta_start: u64) -> Vec<AudioCue> {
    let mut cues = Vec::with_capacity(stagger.item_count() + 2);
    cues.push(AudioCue {
        sound: Sound::Ambient,
        start: FrameIndex(0),
        volume: CueVolume::Ducked {
            base: AMBIENT_VOLUME,
            ducked: AMBIENT_DUCKED_VOLUME,
            duck_start: cta_start.saturating_sub(stagger.intro_delay()),
            duck_frames: AMBIENT_DUCK_FRAMES,
        },
    });
    cues.extend((0..stagger.item_count()).map(|i| AudioCue {
        sound: Sound::Pop,
        start: FrameIndex(stagger.activation_frame(i)),
        volume: CueVolume::Constant(POP_VOLUME),
    }));
    cues.push(AudioCue {
        sound: Sound::Whoosh,
        start: FrameIndex(cta_start),
        volume: CueVolume::Constant(WHOOSH_VOLUME),
    });
    cues
}

/// Pre-rendered buffers for every [`Sound`]; a sound that failed to generate is absent.
#[derive(Clone, Debug, Default)]
pub struct SoundBank {
    pop: Option<Arc<AudioBuffer>>,
    whoosh: Option<Arc<AudioBuffer>>,
    ambient: Option<Arc<AudioBuffer>>,
}

impl SoundBank {
    /// Render all sounds. Failures are logged and the layer is left out.
    #[tracing::instrument]
    pub fn prepare(ambient_secs: f64) -> Self {
        Self {
            pop: keep_or_warn(Sound::Pop, generate_pop_tone()),
            whoosh: keep_or_warn(Sound::Whoosh, generate_whoosh_tone()),
            ambient: keep_or_warn(Sound::Ambient, generate_ambient_tone(ambient_secs)),
        }
    }

    /// Buffer for `sound`, if it was generated.
    pub fn get(&self, sound: Sound) -> Option<&Arc<AudioBuffer>> {
        match sound {
            Sound::Pop => self.pop.as_ref(),
            Sound::Whoosh => self.whoosh.as_ref(),
            Sound::Ambient => self.ambient.as_ref(),
        }
    }

    /// Replace the buffer for `sound`.
    pub fn with(mut self, sound: Sound, buffer: Option<AudioBuffer>) -> Self {
        let slot = match sound {
            Sound::Pop => &mut self.pop,
            Sound::Whoosh => &mut self.whoosh,
            Sound::Ambient => &mut self.ambient,
        };
        *slot = buffer.map(Arc::new);
        self
    }
}

fn keep_or_warn(sound: Sound, result: ReeltimeResult<AudioBuffer>) -> Option<Arc<AudioBuffer>> {
    match result {
        Ok(buffer) => Some(Arc::new(buffer)),
        Err(err) => {
            tracing::warn!(?sound, error = %err, "omitting audio layer");
            None
        }
    }
}

#[derive(Clone, Debug)]
/// One cue clipped to the mixed range, in output sample space.
pub struct AudioSegment {
    /// First output sample frame (inclusive).
    pub timeline_start_sample: u64,
    /// Last output sample frame (exclusive).
    pub timeline_end_sample: u64,
    /// Source sample frame played at `timeline_start_sample`.
    pub source_start_sample: u64,
    /// Gain envelope in cue-local frames.
    pub volume: CueVolume,
    /// Source PCM.
    pub source: Arc<AudioBuffer>,
}

#[derive(Clone, Debug)]
/// Audio rendering plan for a composition frame range.
pub struct AudioManifest {
    /// Output sample rate.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
    /// Composition frame rate, used to evaluate cue volumes.
    pub fps: Fps,
    /// Output length in sample frames.
    pub total_samples: u64,
    /// Contributions to sum.
    pub segments: Vec<AudioSegment>,
}

/// Clip every cue with an available buffer to `range`.
///
/// Ranges longer than [`MAX_TONE_SECS`] are rejected before any buffer is sized from them.
pub fn build_audio_manifest(
    cues: &[AudioCue],
    bank: &SoundBank,
    fps: Fps,
    range: FrameRange,
) -> ReeltimeResult<AudioManifest> {
    if range.is_empty() {
        return Err(ReeltimeError::validation(
            "audio manifest range must be non-empty",
        ));
    }

    let range_start = frame_to_sample(range.start.0, fps, SAMPLE_RATE);
    let range_end = frame_to_sample(range.end.0, fps, SAMPLE_RATE);
    let total_samples = range_end - range_start;
    let max_samples = (MAX_TONE_SECS * f64::from(SAMPLE_RATE)) as u64;
    if total_samples > max_samples {
        return Err(ReeltimeError::audio(format!(
            "soundtrack of {total_samples} samples exceeds the {MAX_TONE_SECS}s limit"
        )));
    }

    let mut segments = Vec::<AudioSegment>::new();
    for cue in cues {
        let Some(source) = bank.get(cue.sound) else {
            continue;
        };
        if source.sample_rate != SAMPLE_RATE || source.channels == 0 {
            return Err(ReeltimeError::audio(format!(
                "{:?} buffer must be {SAMPLE_RATE} Hz with at least one channel",
                cue.sound
            )));
        }

        let cue_start = frame_to_sample(cue.start.0, fps, SAMPLE_RATE);
        let cue_end = cue_start + source.frames() as u64;
        let start = cue_start.max(range_start);
        let end = cue_end.min(range_end);
        if start >= end {
            continue;
        }
        segments.push(AudioSegment {
            timeline_start_sample: start - range_start,
            timeline_end_sample: end - range_start,
            source_start_sample: start - cue_start,
            volume: cue.volume,
            source: Arc::clone(source),
        });
    }

    tracing::debug!(
        cues = cues.len(),
        segments = segments.len(),
        "built audio manifest"
    );
    Ok(AudioManifest {
        sample_rate: SAMPLE_RATE,
        channels: CHANNELS,
        fps,
        total_samples,
        segments,
    })
}

/// Sum all manifest segments into interleaved output PCM, clamped to `[-1, 1]`.
pub fn mix_manifest(manifest: &AudioManifest) -> AudioBuffer {
    let mut out = AudioBuffer::silent(
        manifest.sample_rate,
        manifest.channels,
        manifest.total_samples as usize,
    );

    for seg in &manifest.segments {
        mix_segment(&mut out.samples, manifest, seg);
    }

    for s in &mut out.samples {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn mix_segment(out: &mut [f32], manifest: &AudioManifest, seg: &AudioSegment) {
    let src = &seg.source.samples;
    let src_channels = usize::from(seg.source.channels);
    let src_frames = seg.source.frames() as u64;
    let out_channels = usize::from(manifest.channels);

    for dst_sample in seg.timeline_start_sample..seg.timeline_end_sample {
        let src_sample = seg.source_start_sample + (dst_sample - seg.timeline_start_sample);
        if src_sample >= src_frames {
            break;
        }
        let local_frame =
            src_sample as f64 / f64::from(seg.source.sample_rate) * manifest.fps.as_f64();
        let gain = seg.volume.at(local_frame);

        let i = src_sample as usize * src_channels;
        let (l, r) = if src_channels == 1 {
            (src[i], src[i])
        } else {
            (src[i], src[i + 1])
        };

        let dst_idx = dst_sample as usize * out_channels;
        out[dst_idx] += l * gain;
        if out_channels > 1 {
            out[dst_idx + 1] += r * gain;
        }
    }
}

/// Sample frame reached after `frame_delta` video frames, rounded to nearest.
pub fn frame_to_sample(frame_delta: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frame_delta) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
