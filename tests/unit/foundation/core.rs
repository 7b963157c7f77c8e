use super::*;

#[test]
fn wall_rejects_non_positive_and_non_finite_dimensions() {
    assert!(Wall::new(4.0, 3.0).is_ok());
    for (w, h) in [(0.0, 3.0), (4.0, -1.0), (f64::NAN, 3.0), (4.0, f64::INFINITY)] {
        let err = Wall::new(w, h).unwrap_err();
        assert!(matches!(err, WalltraceError::InvalidConfiguration(_)), "{w}x{h}");
    }
}

#[test]
fn wall_area_is_width_times_height() {
    assert_eq!(Wall::new(4.0, 3.0).unwrap().area(), 12.0);
}

#[test]
fn obstacle_edges_and_bounds() {
    let o = Obstacle::new(1.0, 1.0, 2.0, 1.0);
    assert_eq!(o.right(), 3.0);
    assert_eq!(o.top(), 2.0);
    assert_eq!(o.bounds(), Rect::new(1.0, 1.0, 3.0, 2.0));
}

#[test]
fn waypoint_action_is_optional_in_json() {
    let plain: Waypoint = serde_json::from_str(r#"{"x":1.0,"y":2.0}"#).unwrap();
    assert_eq!(plain, Waypoint::new(1.0, 2.0));

    let painted: Waypoint =
        serde_json::from_str(r#"{"x":1.0,"y":2.0,"action":"paint"}"#).unwrap();
    assert_eq!(painted.action, Some(WaypointAction::Paint));

    let json = serde_json::to_string(&Waypoint::new(0.5, 0.25)).unwrap();
    assert!(!json.contains("action"));
}

#[test]
fn waypoint_distance_is_euclidean() {
    let a = Waypoint::new(0.0, 0.0);
    let b = Waypoint::new(3.0, 4.0);
    assert_eq!(a.distance(&b), 5.0);
}

#[test]
fn render_config_defaults_and_validation() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.scale_x, 80.0);
    assert_eq!(cfg.scale_y, 80.0);
    assert_eq!(cfg.surface_size(&Wall::new(4.0, 3.0).unwrap()), (320.0, 240.0));

    assert!(RenderConfig::new(0.0, 80.0).is_err());
    assert!(RenderConfig::new(80.0, f64::NAN).is_err());
}

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name| {
        vars.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| (*v).to_string())
    }
}

#[test]
fn scale_overrides_apply_per_axis() {
    let cfg = RenderConfig::from_lookup(lookup(&[
        ("WALLTRACE_SCALE_X", "100"),
        ("WALLTRACE_SCALE_Y", " 12.5 "),
    ]));
    assert_eq!(cfg, RenderConfig::new(100.0, 12.5).unwrap());

    let only_x = RenderConfig::from_lookup(lookup(&[("WALLTRACE_SCALE_X", "40")]));
    assert_eq!((only_x.scale_x, only_x.scale_y), (40.0, DEFAULT_SCALE));
}

#[test]
fn unusable_scale_overrides_fall_back_to_defaults() {
    assert_eq!(RenderConfig::from_lookup(lookup(&[])), RenderConfig::default());
    for bad in ["abc", "", "0", "-5", "NaN", "inf"] {
        let cfg = RenderConfig::from_lookup(lookup(&[
            ("WALLTRACE_SCALE_X", bad),
            ("WALLTRACE_SCALE_Y", bad),
        ]));
        assert_eq!(cfg, RenderConfig::default(), "override {bad:?}");
    }
}
