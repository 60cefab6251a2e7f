use cel_animation_core::{
    Animation, Easing, Interpolation, Keyframe, KeyframeValue, Loop, Monospline, Point, Rational,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn r(n: i64) -> Rational {
    Rational::from(n)
}

fn q(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

fn mk_scalar(keys: &[(i64, f64)], interpolation: Interpolation, duration: i64) -> Animation<f64> {
    let keyframes = keys
        .iter()
        .map(|(t, v)| Keyframe::new(*t, *v).with_interpolation(interpolation))
        .collect();
    Animation::new(keyframes, Rational::ZERO, r(duration))
}

#[test]
fn empty_animation_has_no_value() {
    let anim: Animation<f64> = Animation::new(Vec::new(), Rational::ZERO, Rational::ZERO);
    assert_eq!(anim.interpolated_value(Rational::ZERO), None);
    assert!(anim.time_info(r(1)).is_none());
}

#[test]
fn step_interpolation_holds_the_keyframe_value() {
    let anim = mk_scalar(&[(0, 1.0), (2, 5.0), (4, 9.0)], Interpolation::None, 6);
    assert_eq!(anim.interpolated_value(q(1, 2)), Some(1.0));
    assert_eq!(anim.interpolated_value(q(39, 10)), Some(5.0));
    assert_eq!(anim.interpolated_value(r(5)), Some(9.0));
}

#[test]
fn two_keyframes_blend_linearly_even_in_spline_mode() {
    let anim = mk_scalar(&[(0, 0.0), (4, 8.0)], Interpolation::Spline, 4);
    approx(anim.interpolated_value(r(1)).unwrap(), 2.0, 1e-12);
    approx(anim.interpolated_value(r(3)).unwrap(), 6.0, 1e-12);
}

#[test]
fn linear_mode_is_monotonic_without_overshoot() {
    let anim = mk_scalar(&[(0, 0.0), (1, 10.0), (2, -3.0), (3, 4.0)], Interpolation::Linear, 3);
    let mut last = 10.0;
    for i in 1..100 {
        let v = anim.interpolated_value(r(1) + q(i, 100)).unwrap();
        assert!(v <= last && v >= -3.0, "value {v} escaped [-3, 10]");
        last = v;
    }
}

#[test]
fn spline_passes_through_keyframes_and_stays_in_range() {
    let keys = [(0, 0.0), (1, 1.0), (2, 4.0), (3, 4.5), (4, 10.0)];
    let anim = mk_scalar(&keys, Interpolation::Spline, 4);
    for (t, v) in keys {
        assert_eq!(anim.interpolated_value(r(t)), Some(v));
    }
    // Monotone data must produce a monotone curve.
    let mut last = f64::NEG_INFINITY;
    for i in 0..400 {
        let v = anim.interpolated_value(q(i, 100)).unwrap();
        assert!(v >= last, "spline decreased at {i}/100");
        last = v;
    }
}

#[test]
fn spline_of_collinear_values_is_linear() {
    let anim = mk_scalar(&[(0, 0.0), (1, 2.0), (2, 4.0), (3, 6.0)], Interpolation::Spline, 3);
    approx(anim.interpolated_value(q(3, 2)).unwrap(), 3.0, 1e-12);
    approx(anim.interpolated_value(q(1, 4)).unwrap(), 0.5, 1e-12);
    approx(anim.interpolated_value(q(11, 4)).unwrap(), 5.5, 1e-12);
}

#[test]
fn value_converges_to_loop_frame_value() {
    let anim = mk_scalar(&[(0, 0.0), (1, 3.0), (2, 1.0), (3, 2.0)], Interpolation::Spline, 3);
    let target = anim.interpolated_value(r(2)).unwrap();
    assert_eq!(target, 1.0);
    let near = anim.interpolated_value(r(2) - q(1, 100_000)).unwrap();
    approx(near, target, 1e-3);
}

#[test]
fn pre_roll_and_post_roll_hold_edge_values() {
    let keys = vec![Keyframe::new(2, 7.0), Keyframe::new(4, 9.0)];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(6));
    assert_eq!(anim.interpolated_value(r(-3)), Some(7.0));
    assert_eq!(anim.interpolated_value(r(0)), Some(7.0));
    assert_eq!(anim.interpolated_value(r(5)), Some(9.0));
    assert_eq!(anim.interpolated_value(r(60)), Some(9.0));
}

#[test]
fn bound_keyframe_ignores_the_neighbour_before_it() {
    let keys = vec![
        Keyframe::new(0, 0.0),
        Keyframe::new(1, 5.0).with_interpolation(Interpolation::Bound),
        Keyframe::new(2, 1.0),
        Keyframe::new(3, 2.0),
    ];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(3));
    let ms = Monospline::first(1.0, 2.0, 3.0, 0.5);
    let expected = f64::first_monospline(&5.0, &1.0, &2.0, &ms);
    approx(anim.interpolated_value(q(3, 2)).unwrap(), expected, 1e-12);

    let free = Monospline::new(0.0, 1.0, 2.0, 3.0, 0.5);
    let unbound = f64::monospline(&0.0, &5.0, &1.0, &2.0, &free);
    assert!((expected - unbound).abs() > 1e-9);
}

#[test]
fn last_interval_uses_last_monospline() {
    let keys = vec![Keyframe::new(0, 0.0), Keyframe::new(1, 4.0), Keyframe::new(2, 5.0)];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(2));
    let ms = Monospline::last(0.0, 1.0, 2.0, 0.25);
    let expected = f64::last_monospline(&0.0, &4.0, &5.0, &ms);
    approx(anim.interpolated_value(q(5, 4)).unwrap(), expected, 1e-12);
}

#[test]
fn easing_reshapes_the_interval_parameter() {
    let keys = vec![
        Keyframe::new(0, 0.0)
            .with_interpolation(Interpolation::Linear)
            .with_easing(Easing::EASE_IN),
        Keyframe::new(2, 10.0),
    ];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(2));
    let eased = Easing::EASE_IN.convert_t(0.5);
    approx(anim.interpolated_value(r(1)).unwrap(), 10.0 * eased, 1e-9);
    assert!(anim.interpolated_value(r(1)).unwrap() < 5.0);
}

#[test]
fn coincident_keyframes_do_not_produce_nan() {
    let keys = vec![Keyframe::new(0, 0.0), Keyframe::new(0, 3.0), Keyframe::new(1, 6.0)];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(1));
    assert_eq!(anim.interpolated_value(r(0)), Some(3.0));
    let v: f64 = anim.interpolated_value(q(1, 2)).unwrap();
    assert!(v.is_finite());
    approx(v, 4.5, 1e-12);
}

#[test]
fn looped_values_follow_the_replay() {
    let keys = vec![
        Keyframe::new(0, 0.0)
            .with_loop(Loop::Began)
            .with_interpolation(Interpolation::Linear),
        Keyframe::new(1, 10.0).with_interpolation(Interpolation::Linear),
        Keyframe::new(2, 99.0).with_loop(Loop::Ended),
    ];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(6));
    assert_eq!(anim.interpolated_value(r(2)), Some(0.0));
    assert_eq!(anim.interpolated_value(r(3)), Some(10.0));
    approx(anim.interpolated_value(q(5, 2)).unwrap(), 5.0, 1e-12);
    // B -> A on the way back to the loop start.
    approx(anim.interpolated_value(q(7, 2)).unwrap(), 5.0, 1e-12);
    // The end keyframe's own payload is never shown.
    for i in 0..60 {
        assert_ne!(anim.interpolated_value(q(i, 10)), Some(99.0));
    }
}

#[test]
fn spline_loops_stay_within_replayed_values() {
    let keys = vec![
        Keyframe::new(0, 0.0).with_loop(Loop::Began),
        Keyframe::new(1, 10.0),
        Keyframe::new(2, 99.0).with_loop(Loop::Ended),
    ];
    let anim: Animation<f64> = Animation::new(keys, Rational::ZERO, r(6));
    for i in 0..60 {
        let v = anim.interpolated_value(q(i, 10)).unwrap();
        assert!((0.0..=10.0).contains(&v), "value {v} at {i}/10");
    }
}

#[test]
fn points_interpolate_componentwise() {
    let keys = vec![
        Keyframe::new(0, Point::new(0.0, 10.0)).with_interpolation(Interpolation::Linear),
        Keyframe::new(2, Point::new(4.0, 0.0)),
    ];
    let anim = Animation::new(keys, Rational::ZERO, r(2));
    let p = anim.interpolated_value(r(1)).unwrap();
    approx(p.x, 2.0, 1e-12);
    approx(p.y, 5.0, 1e-12);
}

#[test]
fn bool_payload_steps() {
    let keys = vec![Keyframe::new(0, false), Keyframe::new(1, true), Keyframe::new(2, false)];
    let anim = Animation::new(keys, Rational::ZERO, r(3));
    assert_eq!(anim.interpolated_value(q(1, 2)), Some(false));
    assert_eq!(anim.interpolated_value(q(3, 2)), Some(true));
}
