//! Offline synthesis of the short procedural sounds used by compositions.
//!
//! Every generator renders a mono voice with sample-accurate parameter automation and
//! duplicates it into both channels of a 44.1 kHz stereo buffer.

use std::path::Path;

use crate::foundation::error::{ReeltimeError, ReeltimeResult};

/// Sample rate of every generated buffer.
pub const SAMPLE_RATE: u32 = 44_100;

/// Channel count of every generated buffer.
pub const CHANNELS: u16 = 2;

/// Longest tone a generator will render.
pub const MAX_TONE_SECS: f64 = 3600.0;

const POP_SECS: f64 = 0.08;
const WHOOSH_SECS: f64 = 0.5;
const AMBIENT_CHORD_HZ: [f64; 3] = [130.81, 164.81, 196.00];
const AMBIENT_LEVEL: f64 = 0.06;
const AMBIENT_FADE_SECS: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
/// Interleaved `f32` PCM.
pub struct AudioBuffer {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Interleaved samples in `[-1, 1]`.
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Silent buffer holding `frames` sample frames.
    pub fn silent(sample_rate: u32, channels: u16, frames: usize) -> Self {
        Self {
            sample_rate,
            channels,
            samples: vec![0.0; frames * usize::from(channels)],
        }
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / usize::from(self.channels)
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    /// Encode as a 16-bit PCM RIFF/WAVE file.
    pub fn to_wav_bytes(&self) -> ReeltimeResult<Vec<u8>> {
        if self.channels == 0 || self.sample_rate == 0 {
            return Err(ReeltimeError::audio(
                "cannot encode a buffer without channels or sample rate",
            ));
        }
        const BITS: u16 = 16;
        let block_align = self.channels * (BITS / 8);
        let byte_rate = self.sample_rate * u32::from(block_align);
        let data_len = u32::try_from(self.samples.len() * 2)
            .ok()
            .filter(|len| *len <= u32::MAX - 36)
            .ok_or_else(|| ReeltimeError::audio("audio buffer too large for a WAV file"))?;

        let mut bytes = Vec::<u8>::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&self.channels.to_le_bytes());
        bytes.extend_from_slice(&self.sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&BITS.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for &sample in &self.samples {
            let v = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16;
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        Ok(bytes)
    }

    /// Write [`AudioBuffer::to_wav_bytes`] to `out_path`, creating parent directories.
    pub fn write_wav(&self, out_path: &Path) -> ReeltimeResult<()> {
        if let Some(parent) = out_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReeltimeError::audio(format!(
                    "failed to create audio output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        let bytes = self.to_wav_bytes()?;
        std::fs::write(out_path, bytes).map_err(|e| {
            ReeltimeError::audio(format!(
                "failed to write WAV file '{}': {e}",
                out_path.display()
            ))
        })
    }
}

/// Short sine blip sweeping from A5 down to A4 with an exponential decay (80 ms).
pub fn generate_pop_tone() -> ReeltimeResult<AudioBuffer> {
    let frames = frame_count(POP_SECS)?;
    let freq = Automation::new(880.0).exponential(440.0, POP_SECS);
    let gain = Automation::new(0.4).exponential(0.01, POP_SECS);

    let mut osc = Oscillator::new(Waveform::Sine);
    let voice: Vec<f64> = (0..frames)
        .map(|i| {
            let t = time_of(i);
            osc.tick(freq.value_at(t)) * gain.value_at(t)
        })
        .collect();
    Ok(to_stereo(&voice))
}

/// Low-passed sawtooth sweep rising then falling in pitch and brightness (500 ms).
pub fn generate_whoosh_tone() -> ReeltimeResult<AudioBuffer> {
    let frames = frame_count(WHOOSH_SECS)?;
    let peak_at = WHOOSH_SECS * 0.3;
    let freq = Automation::new(100.0)
        .exponential(800.0, peak_at)
        .exponential(200.0, WHOOSH_SECS);
    let cutoff = Automation::new(200.0)
        .exponential(2000.0, peak_at)
        .exponential(400.0, WHOOSH_SECS);
    let gain = Automation::new(0.01)
        .linear(0.3, WHOOSH_SECS * 0.2)
        .exponential(0.01, WHOOSH_SECS);

    let mut osc = Oscillator::new(Waveform::Sawtooth);
    let mut filter = Lowpass::default();
    let voice: Vec<f64> = (0..frames)
        .map(|i| {
            let t = time_of(i);
            let raw = osc.tick(freq.value_at(t));
            filter.process(raw, cutoff.value_at(t)) * gain.value_at(t)
        })
        .collect();
    Ok(to_stereo(&voice))
}

/// Soft C major pad (C3, E3, G3) with slow fade in and out, lasting `duration_secs`.
///
/// Fades last two seconds, shortened to half the duration for tones under four seconds.
pub fn generate_ambient_tone(duration_secs: f64) -> ReeltimeResult<AudioBuffer> {
    let frames = frame_count(duration_secs)?;
    let fade = AMBIENT_FADE_SECS.min(duration_secs / 2.0);
    let gain = Automation::new(0.0)
        .linear(AMBIENT_LEVEL, fade)
        .hold(duration_secs - fade)
        .linear(0.0, duration_secs);

    let mut oscs = AMBIENT_CHORD_HZ.map(|hz| (hz, Oscillator::new(Waveform::Sine)));
    let voice: Vec<f64> = (0..frames)
        .map(|i| {
            let g = gain.value_at(time_of(i));
            oscs.iter_mut().map(|(hz, osc)| osc.tick(*hz)).sum::<f64>() * g
        })
        .collect();
    Ok(to_stereo(&voice))
}

fn frame_count(duration_secs: f64) -> ReeltimeResult<usize> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ReeltimeError::audio(format!(
            "tone duration must be finite and > 0, got {duration_secs}"
        )));
    }
    if duration_secs > MAX_TONE_SECS {
        return Err(ReeltimeError::audio(format!(
            "tone duration {duration_secs}s exceeds the {MAX_TONE_SECS}s limit"
        )));
    }
    let frames = (duration_secs * f64::from(SAMPLE_RATE)).round() as usize;
    if frames == 0 {
        return Err(ReeltimeError::audio(format!(
            "tone duration {duration_secs}s is shorter than one sample"
        )));
    }
    Ok(frames)
}

fn time_of(sample: usize) -> f64 {
    sample as f64 / f64::from(SAMPLE_RATE)
}

fn to_stereo(voice: &[f64]) -> AudioBuffer {
    let mut samples = Vec::with_capacity(voice.len() * usize::from(CHANNELS));
    for &v in voice {
        let s = v.clamp(-1.0, 1.0) as f32;
        samples.push(s);
        samples.push(s);
    }
    AudioBuffer {
        sample_rate: SAMPLE_RATE,
        channels: CHANNELS,
        samples,
    }
}

#[derive(Clone, Copy, Debug)]
enum RampKind {
    Linear,
    Exponential,
}

#[derive(Clone, Copy, Debug)]
struct Ramp {
    kind: RampKind,
    target: f64,
    end_secs: f64,
}

/// Piecewise parameter automation: each ramp runs from the previous breakpoint to its target.
#[derive(Clone, Debug)]
struct Automation {
    initial: f64,
    ramps: Vec<Ramp>,
}

impl Automation {
    fn new(initial: f64) -> Self {
        Self {
            initial,
            ramps: Vec::new(),
        }
    }

    fn push(mut self, kind: RampKind, target: f64, end_secs: f64) -> Self {
        self.ramps.push(Ramp {
            kind,
            target,
            end_secs,
        });
        self
    }

    fn linear(self, target: f64, end_secs: f64) -> Self {
        self.push(RampKind::Linear, target, end_secs)
    }

    // Exponential ramps need both endpoints strictly positive.
    fn exponential(self, target: f64, end_secs: f64) -> Self {
        self.push(RampKind::Exponential, target, end_secs)
    }

    fn hold(self, until_secs: f64) -> Self {
        let current = self.ramps.last().map_or(self.initial, |r| r.target);
        self.linear(current, until_secs)
    }

    fn value_at(&self, t: f64) -> f64 {
        let (mut t0, mut v0) = (0.0, self.initial);
        for ramp in &self.ramps {
            if t < ramp.end_secs {
                let span = ramp.end_secs - t0;
                if span <= 0.0 {
                    return ramp.target;
                }
                let x = ((t - t0) / span).clamp(0.0, 1.0);
                return match ramp.kind {
                    RampKind::Linear => v0 + (ramp.target - v0) * x,
                    RampKind::Exponential => v0 * (ramp.target / v0).powf(x),
                };
            }
            t0 = ramp.end_secs;
            v0 = ramp.target;
        }
        v0
    }
}

#[derive(Clone, Copy, Debug)]
enum Waveform {
    Sine,
    Sawtooth,
}

// Phase accumulator so frequency sweeps stay continuous.
#[derive(Clone, Copy, Debug)]
struct Oscillator {
    waveform: Waveform,
    phase: f64,
}

impl Oscillator {
    fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    fn tick(&mut self, freq_hz: f64) -> f64 {
        let p = self.phase;
        self.phase = (self.phase + freq_hz / f64::from(SAMPLE_RATE)).fract();
        match self.waveform {
            Waveform::Sine => (std::f64::consts::TAU * p).sin(),
            Waveform::Sawtooth => 2.0 * (p - (p + 0.5).floor()),
        }
    }
}

/// Resonant low-pass biquad (RBJ cookbook), coefficients recomputed per sample.
#[derive(Clone, Copy, Debug, Default)]
struct Lowpass {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Lowpass {
    // Q of 1 dB.
    const Q: f64 = 1.122_018_454_301_963_3;

    fn process(&mut self, x: f64, cutoff_hz: f64) -> f64 {
        let nyquist = f64::from(SAMPLE_RATE) / 2.0;
        let cutoff = cutoff_hz.clamp(1.0, nyquist * 0.99);
        let w0 = std::f64::consts::TAU * cutoff / f64::from(SAMPLE_RATE);
        let (sin, cos) = w0.sin_cos();
        let alpha = sin / (2.0 * Self::Q);

        let a0 = 1.0 + alpha;
        let b0 = (1.0 - cos) / 2.0 / a0;
        let b1 = (1.0 - cos) / a0;
        let b2 = b0;
        let a1 = -2.0 * cos / a0;
        let a2 = (1.0 - alpha) / a0;

        let y = b0 * x + b1 * self.x1 + b2 * self.x2 - a1 * self.y1 - a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
