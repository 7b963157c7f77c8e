use super::*;

fn obstacle() -> Vec<Obstacle> {
    vec![Obstacle::new(1.0, 1.0, 2.0, 1.0)]
}

fn approx(a: &Waypoint, b: (f64, f64)) -> bool {
    (a.x - b.0).abs() < 1e-9 && (a.y - b.1).abs() < 1e-9
}

#[test]
fn endpoint_heuristic_hides_segment_when_either_end_is_inside() {
    let obs = obstacle();
    let outside = Waypoint::new(0.0, 0.0);
    let inside = Waypoint::new(2.0, 1.5);
    assert!(EndpointHeuristic.visible_spans(&outside, &inside, &obs).is_empty());
    assert!(EndpointHeuristic.visible_spans(&inside, &outside, &obs).is_empty());
}

#[test]
fn endpoint_heuristic_draws_segments_that_cross_an_obstacle() {
    let obs = obstacle();
    let a = Waypoint::new(0.0, 1.5);
    let b = Waypoint::new(4.0, 1.5);
    let spans = EndpointHeuristic.visible_spans(&a, &b, &obs);
    assert_eq!(spans, vec![Span { from: a, to: b }]);
}

#[test]
fn full_clip_splits_a_crossing_segment_around_the_obstacle() {
    let obs = obstacle();
    let a = Waypoint::new(0.0, 1.5);
    let b = Waypoint::new(4.0, 1.5);
    let spans = FullClip.visible_spans(&a, &b, &obs);
    assert_eq!(spans.len(), 2);
    assert!(approx(&spans[0].from, (0.0, 1.5)));
    assert!(approx(&spans[0].to, (1.0, 1.5)));
    assert!(approx(&spans[1].from, (3.0, 1.5)));
    assert!(approx(&spans[1].to, (4.0, 1.5)));
}

#[test]
fn full_clip_keeps_the_outside_part_of_a_half_blocked_segment() {
    let obs = obstacle();
    let a = Waypoint::new(0.0, 1.5);
    let b = Waypoint::new(2.0, 1.5);
    let spans = FullClip.visible_spans(&a, &b, &obs);
    assert_eq!(spans.len(), 1);
    assert!(approx(&spans[0].to, (1.0, 1.5)));
}

#[test]
fn full_clip_passes_clear_segments_through_unchanged() {
    let obs = obstacle();
    let a = Waypoint::new(0.0, 0.5);
    let b = Waypoint::new(4.0, 0.5);
    assert_eq!(FullClip.visible_spans(&a, &b, &obs), vec![Span { from: a, to: b }]);
}

#[test]
fn full_clip_hides_segments_fully_inside() {
    let obs = obstacle();
    let a = Waypoint::new(1.5, 1.2);
    let b = Waypoint::new(2.5, 1.8);
    assert!(FullClip.visible_spans(&a, &b, &obs).is_empty());
}

#[test]
fn full_clip_merges_overlapping_obstacles() {
    let obs = vec![
        Obstacle::new(1.0, 0.0, 2.0, 1.0),
        Obstacle::new(2.0, 0.0, 2.0, 1.0),
    ];
    let a = Waypoint::new(0.0, 0.5);
    let b = Waypoint::new(5.0, 0.5);
    let spans = FullClip.visible_spans(&a, &b, &obs);
    assert_eq!(spans.len(), 2);
    assert!(approx(&spans[0].to, (1.0, 0.5)));
    assert!(approx(&spans[1].from, (4.0, 0.5)));
}

#[test]
fn markers_follow_containment_for_both_strategies() {
    let obs = obstacle();
    for mode in [VisibilityMode::EndpointHeuristic, VisibilityMode::FullClip] {
        let s = mode.strategy();
        assert!(!s.marker_visible(&Waypoint::new(1.0, 1.0), &obs));
        assert!(s.marker_visible(&Waypoint::new(3.1, 1.0), &obs));
    }
}

#[test]
fn visibility_mode_defaults_to_endpoint_heuristic() {
    assert_eq!(VisibilityMode::default(), VisibilityMode::EndpointHeuristic);
    let parsed: VisibilityMode = serde_json::from_str("\"full_clip\"").unwrap();
    assert_eq!(parsed, VisibilityMode::FullClip);
}
