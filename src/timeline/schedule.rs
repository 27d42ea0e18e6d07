use crate::{
    effects::transitions::{Presentation, TransitionEdge, TransitionSpec},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReeltimeError, ReeltimeResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One timed unit of a timeline, with the transition into the next unit.
pub struct TimelineItem {
    /// Scene name, used for lookups and draw node ids.
    pub name: String,
    /// Intrinsic duration, must be > 0.
    pub duration_in_frames: u64,
    /// Transition overlapping this item with the next one. Ignored on the final item.
    #[serde(default)]
    pub transition_after: Option<TransitionSpec>,
}

impl TimelineItem {
    /// Item without a trailing transition.
    pub fn new(name: impl Into<String>, duration_in_frames: u64) -> Self {
        Self {
            name: name.into(),
            duration_in_frames,
            transition_after: None,
        }
    }

    /// Attach the transition into the next item.
    pub fn then(mut self, transition: TransitionSpec) -> Self {
        self.transition_after = Some(transition);
        self
    }

    fn overlap_after(&self) -> u64 {
        self.transition_after.map_or(0, |t| t.overlap_frames)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Absolute placement of a timeline item.
pub struct ScheduledClip {
    /// Position in the source list.
    pub index: usize,
    /// Item name.
    pub name: String,
    /// First frame (inclusive).
    pub start: FrameIndex,
    /// End frame (exclusive).
    pub end: FrameIndex,
    /// Frames shared with the previous clip.
    pub overlap_in: u64,
    /// Frames shared with the next clip.
    pub overlap_out: u64,
    /// Transition from the previous clip, if any.
    pub transition_in: Option<TransitionSpec>,
    /// Transition into the next clip, if any.
    pub transition_out: Option<TransitionSpec>,
}

impl ScheduledClip {
    /// `[start, end)` as a range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Scheduled length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.end.0 - self.start.0
    }

    /// Frame relative to the clip start, `None` outside the clip.
    pub fn local_frame(&self, frame: FrameIndex) -> Option<FrameIndex> {
        self.range()
            .contains(frame)
            .then(|| FrameIndex(frame.0 - self.start.0))
    }

    /// Combined transition presentation at an absolute frame inside the clip.
    pub fn presentation_at(&self, frame: FrameIndex) -> Presentation {
        let mut out = Presentation::IDENTITY;
        let Some(local) = self.local_frame(frame) else {
            return out;
        };
        if let Some(t) = self.transition_in
            && local.0 < self.overlap_in
        {
            out = out.combine(t.present(TransitionEdge::Entering, local.0));
        }
        let out_start = self.end.0 - self.overlap_out;
        if let Some(t) = self.transition_out
            && self.overlap_out > 0
            && frame.0 >= out_start
        {
            out = out.combine(t.present(TransitionEdge::Exiting, frame.0 - out_start));
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Result of scheduling a list of items.
pub struct Schedule {
    /// Clips in source order; starts and ends are non-decreasing.
    pub clips: Vec<ScheduledClip>,
    /// Total timeline length in frames.
    pub total_duration: u64,
}

/// Place items back to back, overlapping adjacent items by their transition overlap.
///
/// `start[0] = 0`, `start[i] = end[i-1] - overlap[i-1]`, `end[i] = start[i] + duration[i]`.
/// The final item's trailing transition is ignored. An empty list schedules to zero frames.
pub fn schedule(items: &[TimelineItem]) -> ReeltimeResult<Schedule> {
    let mut clips = Vec::with_capacity(items.len());
    let mut cursor = 0u64;
    let mut prev_transition: Option<TransitionSpec> = None;

    for (index, item) in items.iter().enumerate() {
        if item.duration_in_frames == 0 {
            return Err(ReeltimeError::invalid_timeline(format!(
                "item #{index} '{}' has zero duration",
                item.name
            )));
        }

        let is_last = index + 1 == items.len();
        let overlap_in = prev_transition.map_or(0, |t| t.overlap_frames);
        let overlap_out = if is_last { 0 } else { item.overlap_after() };

        let visible = overlap_in
            .checked_add(overlap_out)
            .filter(|&o| o < item.duration_in_frames);
        if visible.is_none() {
            return Err(ReeltimeError::invalid_timeline(format!(
                "item #{index} '{}' lasts {} frames but overlaps {} in and {} out",
                item.name, item.duration_in_frames, overlap_in, overlap_out
            )));
        }

        let start = cursor;
        let end = start.checked_add(item.duration_in_frames).ok_or_else(|| {
            ReeltimeError::invalid_timeline("timeline duration overflows u64 frames")
        })?;

        let transition_out = if is_last { None } else { item.transition_after };
        clips.push(ScheduledClip {
            index,
            name: item.name.clone(),
            start: FrameIndex(start),
            end: FrameIndex(end),
            overlap_in,
            overlap_out,
            transition_in: prev_transition,
            transition_out,
        });

        // overlap_out < duration, so this cannot underflow.
        cursor = end - overlap_out;
        prev_transition = transition_out;
    }

    let total_duration = clips.last().map_or(0, |c| c.end.0);
    if !clips.is_empty() && total_duration == 0 {
        return Err(ReeltimeError::invalid_timeline(
            "timeline total duration must be > 0",
        ));
    }

    tracing::debug!(
        items = clips.len(),
        total_duration,
        "scheduled timeline"
    );
    Ok(Schedule {
        clips,
        total_duration,
    })
}

/// A scheduled clip visible at some frame, with its payload.
#[derive(Debug)]
pub struct ActiveClip<'a, T> {
    /// Placement of the clip.
    pub clip: &'a ScheduledClip,
    /// User payload attached to the item.
    pub payload: &'a T,
    /// Frame relative to the clip start.
    pub local_frame: FrameIndex,
    /// Transition adjustment for the whole clip.
    pub presentation: Presentation,
}

/// Immutable schedule paired with one payload per item.
#[derive(Debug)]
pub struct Timeline<T> {
    schedule: Schedule,
    payloads: Vec<T>,
}

impl<T> Timeline<T> {
    /// Schedule the items and keep their payloads alongside.
    pub fn new(entries: Vec<(TimelineItem, T)>) -> ReeltimeResult<Self> {
        let (items, payloads): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let schedule = schedule(&items)?;
        Ok(Self { schedule, payloads })
    }

    /// Placement of every clip.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Total length in frames.
    pub fn total_duration(&self) -> u64 {
        self.schedule.total_duration
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Whether the timeline holds no clips.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Payload of clip `index`.
    pub fn payload(&self, index: usize) -> Option<&T> {
        self.payloads.get(index)
    }

    /// First clip with the given name.
    pub fn find(&self, name: &str) -> Option<(&ScheduledClip, &T)> {
        self.schedule
            .clips
            .iter()
            .zip(&self.payloads)
            .find(|(c, _)| c.name == name)
    }

    /// Clips drawn at `frame`, earliest first so the entering clip paints on top.
    ///
    /// Outside a transition window exactly one clip is active; inside one, two.
    pub fn active_at(&self, frame: FrameIndex) -> Vec<ActiveClip<'_, T>> {
        let clips = &self.schedule.clips;
        // Ends are strictly increasing, so the first clip still running is found by bisection.
        let first = clips.partition_point(|c| c.end.0 <= frame.0);
        clips[first..]
            .iter()
            .zip(&self.payloads[first..])
            .take_while(|(c, _)| c.start.0 <= frame.0)
            .map(|(clip, payload)| ActiveClip {
                clip,
                payload,
                local_frame: FrameIndex(frame.0 - clip.start.0),
                presentation: clip.presentation_at(frame),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
