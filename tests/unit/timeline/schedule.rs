use super::*;
use crate::effects::transitions::{SlideDirection, TransitionKind};

fn items(durations: &[u64], overlaps: &[u64]) -> Vec<TimelineItem> {
    durations
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let item = TimelineItem::new(format!("item-{i}"), d);
            match overlaps.get(i) {
                Some(&o) => item.then(TransitionSpec::fade(o)),
                None => item,
            }
        })
        .collect()
}

#[test]
fn overlapping_items_shrink_total() {
    let s = schedule(&items(&[60, 90, 75], &[15, 15])).unwrap();
    let starts: Vec<u64> = s.clips.iter().map(|c| c.start.0).collect();
    let ends: Vec<u64> = s.clips.iter().map(|c| c.end.0).collect();
    assert_eq!(starts, vec![0, 45, 120]);
    assert_eq!(ends, vec![60, 135, 195]);
    assert_eq!(s.total_duration, 195);
    assert_eq!(s.clips[1].overlap_in, 15);
    assert_eq!(s.clips[1].overlap_out, 15);
    assert_eq!(s.clips[2].overlap_out, 0);
}

#[test]
fn total_is_sum_minus_overlaps() {
    let durations = [45, 75, 75, 90, 60, 30];
    let overlaps = [10, 5, 0, 20, 7];
    let s = schedule(&items(&durations, &overlaps)).unwrap();
    let expected: u64 = durations.iter().sum::<u64>() - overlaps.iter().sum::<u64>();
    assert_eq!(s.total_duration, expected);
    for w in s.clips.windows(2) {
        assert_eq!(w[1].start.0, w[0].end.0 - w[0].overlap_out);
    }
}

#[test]
fn final_transition_is_ignored() {
    let list = vec![
        TimelineItem::new("a", 30),
        TimelineItem::new("b", 30).then(TransitionSpec::fade(20)),
    ];
    let s = schedule(&list).unwrap();
    assert_eq!(s.total_duration, 60);
    assert!(s.clips[1].transition_out.is_none());
}

#[test]
fn empty_list_is_zero_length() {
    let s = schedule(&[]).unwrap();
    assert!(s.clips.is_empty());
    assert_eq!(s.total_duration, 0);

    let t: Timeline<()> = Timeline::new(Vec::new()).unwrap();
    assert!(t.is_empty());
    assert!(t.active_at(FrameIndex(0)).is_empty());
}

#[test]
fn zero_duration_is_rejected() {
    let err = schedule(&items(&[30, 0, 30], &[])).unwrap_err();
    assert!(matches!(err, ReeltimeError::InvalidTimeline(_)));
}

#[test]
fn overlap_consuming_an_item_is_rejected() {
    // The middle item would be entirely covered by its two transitions.
    let err = schedule(&items(&[60, 30, 60], &[15, 15])).unwrap_err();
    assert!(matches!(err, ReeltimeError::InvalidTimeline(_)));

    let err = schedule(&items(&[10, 60], &[10])).unwrap_err();
    assert!(err.is_timing());

    assert!(schedule(&items(&[31, 31], &[30])).is_ok());
}

#[test]
fn rescheduling_is_deterministic() {
    let list = items(&[60, 90, 75], &[15, 15]);
    assert_eq!(schedule(&list).unwrap(), schedule(&list).unwrap());
}

#[test]
fn active_clips_during_overlap() {
    let t = Timeline::new(vec![
        (
            TimelineItem::new("intro", 60)
                .then(TransitionSpec::slide(SlideDirection::FromRight, 15)),
            'a',
        ),
        (
            TimelineItem::new("body", 90).then(TransitionSpec::fade(15)),
            'b',
        ),
        (TimelineItem::new("outro", 75), 'c'),
    ])
    .unwrap();
    assert_eq!(t.total_duration(), 195);

    let solo = t.active_at(FrameIndex(10));
    assert_eq!(solo.len(), 1);
    assert_eq!(*solo[0].payload, 'a');
    assert_eq!(solo[0].presentation, Presentation::IDENTITY);

    let both = t.active_at(FrameIndex(50));
    assert_eq!(both.len(), 2);
    assert_eq!(*both[0].payload, 'a');
    assert_eq!(*both[1].payload, 'b');
    assert_eq!(both[1].local_frame, FrameIndex(5));
    let enter = both[1].presentation.offset.x;
    let exit = both[0].presentation.offset.x;
    assert!((enter - 10.0 / 15.0).abs() < 1e-12);
    assert!((exit + 5.0 / 15.0).abs() < 1e-12);

    // Fade into the outro: body stays opaque, outro fades in.
    let fade = t.active_at(FrameIndex(125));
    assert_eq!(fade.len(), 2);
    assert_eq!(fade[0].presentation.opacity, 1.0);
    assert!((fade[1].presentation.opacity - 5.0 / 15.0).abs() < 1e-12);

    assert_eq!(t.active_at(FrameIndex(194)).len(), 1);
    assert!(t.active_at(FrameIndex(195)).is_empty());
}

#[test]
fn every_frame_has_one_or_two_clips() {
    let t = Timeline::new(
        items(&[60, 45, 45, 75, 90], &[15, 15, 15, 15])
            .into_iter()
            .map(|i| (i, ()))
            .collect(),
    )
    .unwrap();
    for f in 0..t.total_duration() {
        let n = t.active_at(FrameIndex(f)).len();
        assert!((1..=2).contains(&n), "frame {f}: {n} clips");
    }
}

#[test]
fn find_by_name() {
    let t = Timeline::new(vec![
        (TimelineItem::new("intro", 60), 1),
        (TimelineItem::new("outro", 30), 2),
    ])
    .unwrap();
    let (clip, payload) = t.find("outro").unwrap();
    assert_eq!(clip.start, FrameIndex(60));
    assert_eq!(*payload, 2);
    assert!(t.find("missing").is_none());
    assert_eq!(t.payload(0), Some(&1));
}

#[test]
fn cut_transition_does_not_touch_presentation() {
    let clip = ScheduledClip {
        index: 0,
        name: "x".to_string(),
        start: FrameIndex(0),
        end: FrameIndex(10),
        overlap_in: 0,
        overlap_out: 0,
        transition_in: Some(TransitionSpec::cut()),
        transition_out: Some(TransitionSpec {
            kind: TransitionKind::Fade,
            overlap_frames: 0,
            ease: Default::default(),
        }),
    };
    for f in 0..10 {
        assert_eq!(clip.presentation_at(FrameIndex(f)), Presentation::IDENTITY);
    }
    assert_eq!(clip.local_frame(FrameIndex(10)), None);
}
