use super::*;
use crate::audio::mix::Sound;
use crate::composition::model::{AnnouncementDef, Commit, CommitCategory, ShowcaseDef};

fn commits(n: usize) -> Vec<Commit> {
    (0..n)
        .map(|i| Commit {
            hash: format!("{i:07}"),
            message: format!("message {i}"),
            kind: "feat".to_string(),
            repo: None,
        })
        .collect()
}

fn announcement() -> Composition {
    Composition::build(&CompositionDef::UpdatesAnnouncement(AnnouncementDef {
        categories: vec![
            CommitCategory {
                name: "web".to_string(),
                commits: commits(2),
            },
            CommitCategory {
                name: "api".to_string(),
                commits: commits(1),
            },
        ],
        ..AnnouncementDef::default()
    }))
    .unwrap()
}

fn showcase(n: usize, audio: bool) -> Composition {
    Composition::build(&CompositionDef::CommitShowcase(ShowcaseDef {
        commits: commits(n),
        audio,
        ..ShowcaseDef::default()
    }))
    .unwrap()
}

#[test]
fn announcement_frames_have_clip_roots() {
    let comp = announcement();
    // intro 60, two categories, three commits, outro; seven clips, six overlaps.
    assert_eq!(comp.duration_frames(), 60 + 2 * 45 + 3 * 75 + 90 - 6 * 15);
    assert!(comp.audio_cues().is_empty());

    let m = comp.render(FrameIndex(0)).unwrap();
    assert_eq!((m.width, m.height), (1080, 1080));
    assert_eq!(m.nodes[0].id, "intro");
    assert!(m.node("intro/title").is_some());
    assert!(m.nodes.iter().all(|n| n.id.starts_with("intro")));
}

#[test]
fn transition_window_renders_both_clips() {
    let comp = announcement();
    // Intro ends at 60, category-0 starts at 45 sliding in from the right.
    let m = comp.render(FrameIndex(50)).unwrap();
    let intro = m.node("intro").unwrap();
    let category = m.node("category-0").unwrap();
    let pos_intro = m.nodes.iter().position(|n| n.id == "intro").unwrap();
    let pos_cat = m.nodes.iter().position(|n| n.id == "category-0").unwrap();
    assert!(pos_intro < pos_cat);
    assert!((category.transform.translate.x - 1080.0 * 10.0 / 15.0).abs() < 1e-9);
    assert!((intro.transform.translate.x + 1080.0 * 5.0 / 15.0).abs() < 1e-9);
    assert!(m.node("category-0/badge").is_some());
}

#[test]
fn out_of_range_frames_are_rejected() {
    let comp = showcase(3, false);
    let last = comp.duration_frames() - 1;
    assert!(comp.render(FrameIndex(last)).is_ok());
    let err = comp.render(FrameIndex(last + 1)).unwrap_err();
    assert!(matches!(err, ReeltimeError::Validation(_)));
    assert!(
        comp.render_frames(FrameRange::from_len(comp.duration_frames() + 1))
            .is_err()
    );
}

#[test]
fn parallel_render_matches_sequential() {
    let comp = showcase(6, false);
    let range = FrameRange::new(FrameIndex(50), FrameIndex(120)).unwrap();
    let batch = comp.render_frames(range).unwrap();
    assert_eq!(batch.len(), 70);
    for (i, model) in batch.iter().enumerate() {
        let f = FrameIndex(50 + i as u64);
        assert_eq!(model.frame, f);
        assert_eq!(model, &comp.render(f).unwrap());
    }
}

#[test]
fn showcase_places_audio_cues() {
    let comp = showcase(4, true);
    let cues = comp.audio_cues();
    assert_eq!(cues.iter().filter(|c| c.sound == Sound::Pop).count(), 4);
    assert_eq!(cues.iter().filter(|c| c.sound == Sound::Whoosh).count(), 1);
    assert_eq!(cues.iter().filter(|c| c.sound == Sound::Ambient).count(), 1);
    assert!(showcase(4, false).audio_cues().is_empty());
}

#[test]
fn soundtrack_covers_the_composition() {
    let comp = showcase(2, true);
    let track = comp.render_soundtrack().unwrap().unwrap();
    let expected = comp.duration_frames() as usize * 44_100 / 30;
    assert_eq!(track.frames(), expected);
    assert!(track.peak() > 0.0 && track.peak() <= 1.0);

    assert!(showcase(2, false).render_soundtrack().unwrap().is_none());
}

#[test]
fn invalid_showcase_fails_to_build() {
    let err = Composition::build(&CompositionDef::CommitShowcase(ShowcaseDef {
        interval: 0,
        ..ShowcaseDef::default()
    }))
    .unwrap_err();
    assert!(err.is_timing());
}

#[test]
fn overflowing_showcase_timing_fails_to_build() {
    let err = Composition::build(&CompositionDef::CommitShowcase(ShowcaseDef {
        intro_delay: u64::MAX - 15,
        commits: commits(1),
        ..ShowcaseDef::default()
    }))
    .unwrap_err();
    assert!(matches!(err, ReeltimeError::InvalidTimeline(_)));
}

#[test]
fn oversized_window_renders_without_overflow() {
    let def: CompositionDef = serde_json::from_str(&format!(
        r#"{{"kind":"commit_showcase","visible_count":{},"commits":[
            {{"hash":"a","message":"one","type":"feat"}},
            {{"hash":"b","message":"two","type":"fix"}}]}}"#,
        usize::MAX
    ))
    .unwrap();
    let comp = Composition::build(&def).unwrap();
    let m = comp.render(FrameIndex(100)).unwrap();
    assert!(m.node("showcase/page/content/feed/commit-0").is_some());
    assert_eq!(m.node("showcase/page/content/feed").unwrap().transform.translate.y, 0.0);
}

#[test]
fn overlong_soundtrack_is_an_audio_error() {
    let comp = Composition::build(&CompositionDef::CommitShowcase(ShowcaseDef {
        interval: 1_000_000_000_000,
        commits: commits(2),
        ..ShowcaseDef::default()
    }))
    .unwrap();
    let err = comp.render_soundtrack().unwrap_err();
    assert!(matches!(err, ReeltimeError::AudioGeneration(_)));
}
