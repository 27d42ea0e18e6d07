use super::*;

#[test]
fn fade_only_touches_entering_opacity() {
    let t = TransitionSpec::fade(15);
    let enter = t.present(TransitionEdge::Entering, 0);
    assert_eq!(enter.opacity, 0.0);
    assert_eq!(enter.offset, Vec2::ZERO);
    let mid = t.present(TransitionEdge::Entering, 5);
    assert!((mid.opacity - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(t.present(TransitionEdge::Exiting, 7), Presentation::IDENTITY);
    assert_eq!(t.present(TransitionEdge::Entering, 15).opacity, 1.0);
}

#[test]
fn slide_from_right_pushes_exiting_left() {
    let t = TransitionSpec::slide(SlideDirection::FromRight, 10);
    assert_eq!(t.present(TransitionEdge::Entering, 0).offset, Vec2::new(1.0, 0.0));
    assert_eq!(t.present(TransitionEdge::Exiting, 0).offset, Vec2::new(-0.0, -0.0));
    let enter = t.present(TransitionEdge::Entering, 5);
    let exit = t.present(TransitionEdge::Exiting, 5);
    assert!((enter.offset.x - 0.5).abs() < 1e-12);
    assert!((exit.offset.x + 0.5).abs() < 1e-12);
    // Both clips move together: the gap between them is always one canvas width.
    for f in 0..=10 {
        let e = t.present(TransitionEdge::Entering, f).offset.x;
        let x = t.present(TransitionEdge::Exiting, f).offset.x;
        assert!((e - x - 1.0).abs() < 1e-12);
    }
}

#[test]
fn vertical_slides_use_y_axis() {
    let top = TransitionKind::Slide(SlideDirection::FromTop);
    assert_eq!(top.present(TransitionEdge::Entering, 0.0).offset, Vec2::new(0.0, -1.0));
    let bottom = TransitionKind::Slide(SlideDirection::FromBottom);
    let exit = bottom.present(TransitionEdge::Exiting, 1.0);
    assert_eq!(exit.offset, Vec2::new(-0.0, -1.0));
}

#[test]
fn cut_and_zero_overlap_are_complete() {
    let cut = TransitionSpec::cut();
    assert_eq!(cut.progress(0), 1.0);
    assert_eq!(cut.present(TransitionEdge::Entering, 0), Presentation::IDENTITY);
}

#[test]
fn eased_progress_stays_in_unit_range() {
    let t = TransitionSpec::fade(20).with_ease(Ease::InOutCubic);
    for f in 0..=40 {
        let p = t.progress(f);
        assert!((0.0..=1.0).contains(&p));
    }
    assert!(t.progress(5) < 0.25);
}

#[test]
fn presentations_combine() {
    let a = Presentation {
        opacity: 0.5,
        offset: Vec2::new(0.25, 0.0),
    };
    let b = Presentation {
        opacity: 0.5,
        offset: Vec2::new(0.0, -1.0),
    };
    let c = a.combine(b);
    assert_eq!(c.opacity, 0.25);
    assert_eq!(c.offset, Vec2::new(0.25, -1.0));
    assert_eq!(a.combine(Presentation::IDENTITY), a);
}

#[test]
fn parse_accepts_aliases() {
    assert_eq!(parse_transition_kind("Fade", None).unwrap(), TransitionKind::Fade);
    assert_eq!(parse_transition_kind("cut", None).unwrap(), TransitionKind::None);
    assert_eq!(
        parse_transition_kind("slide", None).unwrap(),
        TransitionKind::Slide(SlideDirection::FromRight)
    );
    assert_eq!(
        parse_transition_kind("slide", Some("ltr")).unwrap(),
        TransitionKind::Slide(SlideDirection::FromLeft)
    );
    assert!(parse_transition_kind("", None).is_err());
    assert!(parse_transition_kind("wipe", None).is_err());
    assert!(parse_transition_kind("slide", Some("diagonal")).is_err());
}

#[test]
fn spec_deserializes_from_json() {
    let t: TransitionSpec =
        serde_json::from_str(r#"{"kind":{"slide":"from_left"},"overlap_frames":12}"#).unwrap();
    assert_eq!(t, TransitionSpec::slide(SlideDirection::FromLeft, 12));
    let f: TransitionSpec = serde_json::from_str(r#"{"kind":"fade","overlap_frames":15}"#).unwrap();
    assert_eq!(f, TransitionSpec::fade(15));
}
