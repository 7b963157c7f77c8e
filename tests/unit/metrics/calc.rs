use super::*;

fn wall() -> Wall {
    Wall::new(4.0, 3.0).unwrap()
}

fn pts(raw: &[(f64, f64)]) -> Vec<Waypoint> {
    raw.iter().copied().map(Waypoint::from).collect()
}

#[test]
fn rectangle_walk_matches_hand_computed_numbers() {
    let m = compute_metrics(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]), &wall(), 0.5).unwrap();
    assert_eq!(m.path_length, 7.0);
    assert!((m.coverage_percent - 29.166_666_666).abs() < 1e-6);
    assert!((m.estimated_duration - 0.3).abs() < 1e-12);
    assert_eq!(m.painted_length, 0.0);
}

#[test]
fn empty_and_single_point_trajectories_have_zero_length() {
    let empty = compute_metrics(&[], &wall(), 0.5).unwrap();
    assert_eq!(empty.path_length, 0.0);
    assert_eq!(empty.coverage_percent, 0.0);
    assert_eq!(empty.estimated_duration, 0.0);

    let single = compute_metrics(&pts(&[(1.0, 1.0)]), &wall(), 0.5).unwrap();
    assert_eq!(single.path_length, 0.0);
    assert!((single.estimated_duration - 0.1).abs() < 1e-12);
}

#[test]
fn zero_length_metrics_are_positive_zero() {
    for t in [Vec::new(), pts(&[(1.0, 1.0)])] {
        let m = compute_metrics(&t, &wall(), 0.5).unwrap();
        assert!(m.path_length.is_sign_positive());
        assert!(m.coverage_percent.is_sign_positive());
        assert!(m.painted_length.is_sign_positive());
        assert!(!m.to_string().contains("-0.00"));
        assert!(!serde_json::to_string(&m).unwrap().contains("-0.0"));
    }

    let single = compute_metrics(&pts(&[(1.0, 1.0)]), &wall(), 0.5).unwrap();
    assert_eq!(
        single.to_string(),
        "Path Length: 0.00 m\nCoverage: 0.00%\nEstimated Duration: 0.10 s"
    );
}

#[test]
fn prefix_is_never_longer_than_the_full_path() {
    let full = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0), (0.0, 2.0)]);
    let mut previous = 0.0;
    for n in 0..=full.len() {
        let len = path_length(&full[..n]);
        assert!(len >= previous);
        previous = len;
    }
}

#[test]
fn coverage_may_exceed_one_hundred_percent() {
    let back_and_forth = pts(&[(0.0, 0.0), (4.0, 0.0), (0.0, 0.0), (4.0, 0.0), (0.0, 0.0)]);
    let m = compute_metrics(&back_and_forth, &wall(), 3.0).unwrap();
    assert!(m.coverage_percent > 100.0);
    assert!(m.coverage_percent.is_finite());
}

#[test]
fn non_positive_coverage_width_is_rejected() {
    let t = pts(&[(0.0, 0.0), (1.0, 0.0)]);
    for width in [0.0, -0.5, f64::NAN] {
        let err = compute_metrics(&t, &wall(), width).unwrap_err();
        assert!(matches!(err, WalltraceError::InvalidConfiguration(_)));
    }
}

#[test]
fn degenerate_wall_is_rejected_instead_of_dividing_by_zero() {
    let flat = Wall {
        width: 4.0,
        height: 0.0,
    };
    let err = compute_metrics(&pts(&[(0.0, 0.0), (1.0, 0.0)]), &flat, 0.5).unwrap_err();
    assert!(matches!(err, WalltraceError::InvalidConfiguration(_)));
}

#[test]
fn negative_wall_dimensions_are_rejected_even_with_positive_area() {
    let inverted = Wall {
        width: -4.0,
        height: -3.0,
    };
    assert!(inverted.area() > 0.0);
    let err = compute_metrics(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]), &inverted, 0.5)
        .unwrap_err();
    assert!(matches!(err, WalltraceError::InvalidConfiguration(_)));
}

#[test]
fn non_finite_waypoints_never_leak_into_metrics() {
    let t = pts(&[(0.0, 0.0), (f64::INFINITY, 0.0)]);
    assert!(compute_metrics(&t, &wall(), 0.5).is_err());
}

#[test]
fn painted_length_counts_segments_ending_on_paint() {
    let t = vec![
        Waypoint::new(0.0, 0.0).with_action(WaypointAction::Move),
        Waypoint::new(4.0, 0.0).with_action(WaypointAction::Paint),
        Waypoint::new(4.0, 1.0).with_action(WaypointAction::Move),
        Waypoint::new(1.0, 1.0).with_action(WaypointAction::Paint),
    ];
    let m = compute_metrics(&t, &wall(), 0.15).unwrap();
    assert_eq!(m.path_length, 8.0);
    assert_eq!(m.painted_length, 7.0);
}

#[test]
fn metrics_are_independent_of_call_order() {
    let t = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]);
    let a = compute_metrics(&t, &wall(), 0.5).unwrap();
    let b = compute_metrics(&t, &wall(), 0.5).unwrap();
    assert_eq!(a, b);
}

#[test]
fn display_uses_two_decimals() {
    let m = compute_metrics(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]), &wall(), 0.5).unwrap();
    assert_eq!(
        m.to_string(),
        "Path Length: 7.00 m\nCoverage: 29.17%\nEstimated Duration: 0.30 s"
    );
}
