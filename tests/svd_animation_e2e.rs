use svdviz::driver::ManualScheduler;
use svdviz::pipeline::Phase;
use svdviz::render::{COMPLETE_CAPTION, IDLE_CAPTION};
use svdviz::surface::{Recorder, SvgSurface};
use svdviz::{Mat2, PlaybackStatus, View, Visualizer, VizConfig};

fn visualizer() -> Visualizer<ManualScheduler> {
    Visualizer::new(VizConfig::default(), ManualScheduler::new()).unwrap()
}

/// Max distance from the curve's pixel points to the expected image of the unit circle.
fn curve_error(curve: &[[f64; 2]], a: &Mat2, step: f64) -> f64 {
    let mut worst = 0.0f64;
    for (i, p) in curve.iter().enumerate() {
        let theta = i as f64 * step;
        let q = a.apply([theta.cos(), theta.sin()]);
        let expect = [300.0 + 60.0 * q[0], 300.0 - 60.0 * q[1]];
        worst = worst.max((p[0] - expect[0]).hypot(p[1] - expect[1]));
    }
    worst
}

#[test]
fn spd_matrix_plays_to_completion_and_ends_on_a() {
    let a = Mat2::new(3.0, 1.0, 1.0, 2.0);
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize(&a, &mut s).unwrap();

    let [s1, s2] = v.session().unwrap().decomposition().singular_values();
    let root5 = 5.0f64.sqrt();
    assert!((s1 - (5.0 + root5) / 2.0).abs() < 1e-12);
    assert!((s2 - (5.0 - root5) / 2.0).abs() < 1e-12);

    assert!(v.on_play());
    let drawn = v.pump(&mut s, 1_000);
    assert_eq!(drawn, 150);
    assert_eq!(v.status(), Some(PlaybackStatus::Complete));
    assert_eq!(v.scheduler().pending(), 0);
    assert_eq!(s.info(), COMPLETE_CAPTION);

    let curve = s.last_polyline().unwrap();
    assert_eq!(curve.len(), 63);
    assert!(curve_error(curve, &a, 0.1) < 1e-9);

    // Play after completion is refused until reset.
    assert!(!v.on_play());
    v.on_reset(&mut s);
    assert_eq!(s.info(), IDLE_CAPTION);
    assert!(v.on_play());
    assert_eq!(v.pump(&mut s, 1_000), 150);
}

#[test]
fn identity_matrix_never_moves_the_circle() {
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize(&Mat2::identity(), &mut s).unwrap();
    v.on_play();
    while let Some(g) = v.scheduler_mut().pop() {
        let f = v.on_frame(g, &mut s).unwrap();
        assert_eq!(f.transform, Mat2::identity());
        let curve = s.last_polyline().unwrap();
        assert!(curve_error(curve, &Mat2::identity(), 0.1) < 1e-9);
    }
    assert_eq!(v.status(), Some(PlaybackStatus::Complete));
}

#[test]
fn zero_matrix_shrinks_during_scaling_then_stays_a_point() {
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize(&Mat2::zeros(), &mut s).unwrap();
    assert_eq!(*v.session().unwrap().decomposition().sigma(), Mat2::zeros());
    v.on_play();

    let mut last_radius = f64::INFINITY;
    while let Some(g) = v.scheduler_mut().pop() {
        let f = v.on_frame(g, &mut s).unwrap();
        let curve = s.last_polyline().unwrap();
        let radius = curve
            .iter()
            .map(|p| (p[0] - 300.0).hypot(p[1] - 300.0))
            .fold(0.0f64, f64::max);
        match f.phase {
            Phase::RotateVt => assert!((radius - 60.0).abs() < 1e-9),
            Phase::ScaleSigma => {
                assert!(radius <= last_radius + 1e-9);
                last_radius = radius;
            }
            Phase::RotateU | Phase::Complete => assert_eq!(radius, 0.0),
        }
    }
}

#[test]
fn pause_then_spurious_callbacks_change_nothing() {
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize_fields(["1.5", "-0.3", "0.8", "2.1"], &mut s)
        .unwrap();
    v.on_play();
    assert_eq!(v.pump(&mut s, 73), 73);
    assert!(v.on_pause());

    let state = v.session().unwrap().driver().state();
    let clears = s.clear_count();
    let info = s.info().to_string();
    let live = v.session().unwrap().driver().token();
    for _ in 0..20 {
        assert!(v.on_frame(live, &mut s).is_none());
    }
    assert_eq!(v.pump(&mut s, 20), 0);
    assert_eq!(v.session().unwrap().driver().state(), state);
    assert_eq!(s.clear_count(), clears);
    assert_eq!(s.info(), info);
    assert_eq!(v.status(), Some(PlaybackStatus::Paused));

    // Resume finishes the remaining ticks.
    v.on_play();
    assert_eq!(v.pump(&mut s, 1_000), 150 - 73);
}

/// Fire the callbacks queued at the start of one display refresh.
fn refresh(v: &mut Visualizer<ManualScheduler>, s: &mut Recorder) -> usize {
    let due = v.scheduler().pending();
    v.pump(s, due)
}

#[test]
fn pause_and_play_within_one_refresh_runs_a_single_loop() {
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize(&Mat2::new(3.0, 1.0, 1.0, 2.0), &mut s).unwrap();
    v.on_play();
    for _ in 0..10 {
        assert_eq!(refresh(&mut v, &mut s), 1);
    }

    assert!(v.on_pause());
    assert!(v.on_play());
    let before = v.session().unwrap().driver().state().progress;
    assert_eq!(refresh(&mut v, &mut s), 1);
    assert_eq!(v.session().unwrap().driver().state().progress, before + 2);
    assert_eq!(v.scheduler().pending(), 1);

    // Same through reset.
    v.on_reset(&mut s);
    assert!(v.on_play());
    let clears = s.clear_count();
    assert_eq!(refresh(&mut v, &mut s), 1);
    assert_eq!(s.clear_count(), clears + 1);
    assert_eq!(v.session().unwrap().driver().state().progress, 2);

    let mut refreshes = 1;
    while refresh(&mut v, &mut s) == 1 {
        refreshes += 1;
    }
    assert_eq!(refreshes, 150);
    assert_eq!(v.status(), Some(PlaybackStatus::Complete));
}

#[test]
fn new_matrix_mid_animation_starts_clean() {
    let mut v = visualizer();
    let mut s = Recorder::new();
    v.on_visualize(&Mat2::new(0.0, -2.0, 1.0, 0.0), &mut s).unwrap();
    v.on_play();
    v.pump(&mut s, 40);

    v.on_new_matrix();
    assert_eq!(v.view(), View::Input);
    v.on_visualize(&Mat2::new(1.0, 1.0, 0.0, 1.0), &mut s).unwrap();
    let d = v.session().unwrap().driver();
    assert_eq!(d.status(), PlaybackStatus::Idle);
    assert_eq!(d.state().progress, 0);

    // Only the stale request is queued; it must not advance the new session.
    assert_eq!(v.pump(&mut s, 10), 0);
    assert_eq!(v.status(), Some(PlaybackStatus::Idle));
}

#[test]
fn frames_render_to_svg() {
    let mut v = visualizer();
    let cfg = VizConfig::default();
    let mut svg = SvgSurface::new(cfg.width, cfg.height);
    v.on_visualize(&Mat2::new(2.0, 0.5, -0.5, 1.0), &mut svg).unwrap();
    let idle = svg.to_document();
    assert!(idle.contains("<circle"));
    assert!(!idle.contains("<polygon"));
    assert!(idle.contains(IDLE_CAPTION));

    v.on_play();
    v.pump(&mut svg, 25);
    let doc = svg.to_document();
    assert!(doc.contains("<polygon"));
    assert!(doc.contains("Step 1: Applying Vᵀ (rotation) - 50%"));
    assert_eq!(doc.matches("<text").count(), 2);
}
