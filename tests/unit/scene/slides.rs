use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex};

fn ctx(frame: u64) -> SceneCtx {
    SceneCtx {
        local_frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1080,
            height: 1080,
        },
    }
}

fn sample(scene: &dyn Scene, frame: u64) -> Vec<DrawNode> {
    let mut out = Vec::new();
    scene.sample(&ctx(frame), &mut out);
    out
}

fn find<'a>(nodes: &'a [DrawNode], id: &str) -> &'a DrawNode {
    nodes
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("missing node {id}"))
}

#[test]
fn intro_staggers_title_and_subtitle() {
    let intro = IntroScene::new(60, "Product Updates", "What we shipped today").unwrap();
    let first = sample(&intro, 0);
    assert_eq!(find(&first, "logo").transform.scale, 0.0);
    assert_eq!(find(&first, "logo").text.as_deref(), Some("P"));
    assert_eq!(find(&first, "title").opacity, 0.0);
    assert_eq!(find(&first, "title").transform.translate.y, 30.0);
    assert_eq!(find(&first, "subtitle").opacity, 0.0);

    // Title held until its delay elapses.
    assert_eq!(find(&sample(&intro, 10), "title").opacity, 0.0);

    let late = sample(&intro, 59);
    assert!((find(&late, "title").opacity - 1.0).abs() < 0.01);
    assert!(find(&late, "title").transform.translate.y.abs() < 0.5);
    assert_eq!(find(&late, "subtitle").opacity, 1.0);
    assert!((find(&late, "logo").transform.scale - 1.0).abs() < 0.05);
}

#[test]
fn category_badge_pluralizes() {
    let one = CategoryScene::new(45, "API", 1).unwrap();
    assert_eq!(one.badge_text(), "1 update");
    let many = CategoryScene::new(45, "Chat", 7).unwrap();
    assert_eq!(many.badge_text(), "7 updates");
    let nodes = sample(&many, 44);
    assert_eq!(find(&nodes, "title").text.as_deref(), Some("Chat"));
    assert!(find(&nodes, "badge").opacity > 0.9);
}

#[test]
fn commit_card_progress_dots() {
    let card = CommitScene::new(75, "Remove SMS handler", "chore", 2, 4).unwrap();
    let nodes = sample(&card, 0);
    assert_eq!(find(&nodes, "card/counter").text.as_deref(), Some("2 / 4"));
    assert_eq!(find(&nodes, "card/message").opacity, 0.0);
    assert_eq!(find(&nodes, "card/badge").transform.translate.x, -20.0);
    assert_eq!(find(&nodes, "dots/dot-0").opacity, 1.0);
    assert_eq!(find(&nodes, "dots/dot-1").opacity, 1.0);
    assert_eq!(find(&nodes, "dots/dot-2").opacity, DOT_DIM_OPACITY);
    assert_eq!(find(&nodes, "dots/dot-3").opacity, DOT_DIM_OPACITY);

    let mid = sample(&card, 15);
    assert!((find(&mid, "card/message").opacity - 0.5).abs() < 1e-12);
    assert_eq!(find(&sample(&card, 20), "card/message").opacity, 1.0);
}

#[test]
fn outro_pulses_after_fade_in() {
    let outro = OutroScene::new(90, 11, "example.com").unwrap();
    assert_eq!(find(&sample(&outro, 20), "cta").opacity, 0.0);
    let peak = sample(&outro, 45);
    assert_eq!(find(&peak, "cta").opacity, 1.0);
    assert!((find(&peak, "cta").transform.scale - 1.05).abs() < 1e-12);
    assert!((find(&sample(&outro, 60), "cta").transform.scale - 1.0).abs() < 1e-12);
    assert_eq!(find(&peak, "stats").text.as_deref(), Some("11 updates"));
}

#[test]
fn sampling_is_repeatable() {
    let intro = IntroScene::new(60, "T", "S").unwrap();
    for f in [40, 3, 40, 0, 59] {
        assert_eq!(sample(&intro, f), sample(&intro, f));
    }
}
