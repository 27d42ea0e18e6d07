use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn rest_until_delay_elapses() {
    let cfg = SpringConfig::with_damping(12.0);
    for frame in -5..=10 {
        assert_eq!(spring_value(f64::from(frame), fps30(), &cfg, 10.0), 0.0);
    }
    assert!(spring_value(11.0, fps30(), &cfg, 10.0) > 0.0);
}

#[test]
fn converges_to_one_for_every_damping_regime() {
    for damping in [5.0, 12.0, 20.0, 200.0] {
        let cfg = SpringConfig::with_damping(damping);
        let v = spring_value(3000.0, fps30(), &cfg, 0.0);
        assert!((v - 1.0).abs() < 1e-6, "damping {damping}: {v}");
    }
}

#[test]
fn under_damped_overshoots_then_settles() {
    let cfg = SpringConfig::with_damping(12.0);
    assert!(cfg.damping_ratio() < 1.0);
    let values: Vec<f64> = (0..120)
        .map(|f| spring_value(f64::from(f), fps30(), &cfg, 0.0))
        .collect();
    assert!(values.iter().any(|&v| v > 1.0));
    assert!((values[119] - 1.0).abs() < 1e-3);
}

#[test]
fn critical_and_over_damped_never_overshoot() {
    for cfg in [SpringConfig::critical(), SpringConfig::with_damping(200.0)] {
        assert!(cfg.damping_ratio() >= 1.0 - 1e-9);
        let mut prev = 0.0;
        for f in 0..600 {
            let v = spring_value(f64::from(f), fps30(), &cfg, 0.0);
            assert!(v <= 1.0 + 1e-12, "{cfg:?} frame {f}: {v}");
            assert!(v >= prev - 1e-12, "{cfg:?} frame {f} not monotonic");
            prev = v;
        }
    }
}

#[test]
fn overshoot_clamping_caps_progress() {
    let cfg = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::with_damping(8.0)
    };
    for f in 0..200 {
        let v = spring_value(f64::from(f), fps30(), &cfg, 0.0);
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn initial_velocity_speeds_up_release() {
    let still = SpringConfig::critical();
    let pushed = SpringConfig {
        initial_velocity: 5.0,
        ..still
    };
    assert!(spring_value(2.0, fps30(), &pushed, 0.0) > spring_value(2.0, fps30(), &still, 0.0));
}

#[test]
fn seeking_matches_sequential_sampling() {
    let spring = Spring::new(SpringConfig::new(15.0, 120.0))
        .unwrap()
        .delayed(5.0)
        .between(20.0, 0.0);
    let forward: Vec<f64> = (0..90).map(|f| spring.value(f64::from(f), fps30())).collect();
    for f in (0..90).rev() {
        assert_eq!(
            spring.value(f64::from(f), fps30()).to_bits(),
            forward[f as usize].to_bits()
        );
    }
    assert_eq!(forward[0], 20.0);
}

#[test]
fn damping_ratio_round_trips() {
    let cfg = SpringConfig::from_damping_ratio(0.6, 100.0, 1.0);
    assert!((cfg.damping - 12.0).abs() < 1e-12);
    assert!((cfg.damping_ratio() - 0.6).abs() < 1e-12);
    assert!((SpringConfig::critical().damping - 20.0).abs() < 1e-12);
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            stiffness: -1.0,
            ..SpringConfig::default()
        },
        SpringConfig::with_damping(-0.5),
        SpringConfig::with_damping(f64::NAN),
    ];
    for cfg in bad {
        assert!(matches!(
            cfg.validate(),
            Err(ReeltimeError::InvalidRange(_))
        ));
        assert!(Spring::new(cfg).is_err());
    }
}

#[test]
fn measure_spring_finds_settle_frame() {
    let cfg = SpringConfig::critical();
    let settled = measure_spring(fps30(), &cfg, 0.005).unwrap();
    assert!((10..60).contains(&settled), "settled at {settled}");
    for f in settled..settled + 200 {
        let v = spring_value(f as f64, fps30(), &cfg, 0.0);
        assert!((1.0 - v).abs() < 0.005);
    }
    assert!((1.0 - spring_value((settled - 1) as f64, fps30(), &cfg, 0.0)).abs() >= 0.005);
}

#[test]
fn undamped_spring_never_settles() {
    let cfg = SpringConfig::with_damping(0.0);
    assert!(measure_spring(fps30(), &cfg, 0.01).is_err());
    assert!(measure_spring(fps30(), &SpringConfig::critical(), 0.0).is_err());
}
