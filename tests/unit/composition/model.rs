use super::*;

#[test]
fn defaults_fill_missing_fields() {
    let def = CompositionDef::from_reader(r#"{"kind":"commit_showcase"}"#.as_bytes()).unwrap();
    let CompositionDef::CommitShowcase(s) = def else {
        panic!("wrong variant");
    };
    assert_eq!(s.fps, Fps::new(30, 1).unwrap());
    assert_eq!((s.canvas.width, s.canvas.height), (1280, 1000));
    assert_eq!(s.intro_delay, 60);
    assert_eq!(s.interval, 50);
    assert_eq!(s.visible_count, 5);
    assert_eq!(s.settle_frames, 30);
    assert!(s.audio);
    assert_eq!(s.duration_frames().unwrap(), 150);

    let def =
        CompositionDef::from_reader(r#"{"kind":"updates_announcement"}"#.as_bytes()).unwrap();
    let CompositionDef::UpdatesAnnouncement(a) = def else {
        panic!("wrong variant");
    };
    assert_eq!((a.canvas.width, a.canvas.height), (1080, 1080));
    assert_eq!(
        (a.intro_frames, a.category_frames, a.commit_frames, a.outro_frames, a.transition_frames),
        (60, 45, 75, 90, 15)
    );
}

#[test]
fn commit_type_field_is_renamed() {
    let c: Commit =
        serde_json::from_str(r#"{"hash":"abcdef0123","message":"m","type":"fix"}"#).unwrap();
    assert_eq!(c.kind, "fix");
    assert_eq!(c.repo, None);
    assert_eq!(c.short_hash(), "abcdef0");
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["type"], "fix");
    assert!(json.get("repo").is_none());
}

#[test]
fn fixtures_parse() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    let showcase = CompositionDef::from_path(dir.join("showcase.json")).unwrap();
    assert!(matches!(&showcase, CompositionDef::CommitShowcase(s) if s.commits.len() == 7));
    let ann = CompositionDef::from_path(dir.join("announcement.json")).unwrap();
    let CompositionDef::UpdatesAnnouncement(a) = ann else {
        panic!("wrong variant");
    };
    assert_eq!(a.title, "Release Notes");
    assert_eq!(a.total_commits(), 5);
}

#[test]
fn bad_input_is_reported() {
    let err = CompositionDef::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, ReeltimeError::Serde(_)));

    let err = CompositionDef::from_reader(r#"{"kind":"slideshow"}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ReeltimeError::Serde(_)));

    let err = CompositionDef::from_reader(
        r#"{"kind":"commit_showcase","fps":{"num":0,"den":1}}"#.as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, ReeltimeError::Validation(_)));

    let err = CompositionDef::from_reader(
        r#"{"kind":"commit_showcase","canvas":{"width":0,"height":10}}"#.as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, ReeltimeError::Validation(_)));

    let err = CompositionDef::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ReeltimeError::Validation(_)));
}

#[test]
fn showcase_duration_overflow_is_a_timeline_error() {
    let s = ShowcaseDef {
        interval: u64::MAX / 2,
        commits: vec![
            Commit {
                hash: "a".to_string(),
                message: "one".to_string(),
                kind: "feat".to_string(),
                repo: None,
            };
            3
        ],
        ..ShowcaseDef::default()
    };
    assert!(matches!(
        s.duration_frames().unwrap_err(),
        ReeltimeError::InvalidTimeline(_)
    ));
}
