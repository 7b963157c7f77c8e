use super::*;
use crate::foundation::core::Point;

fn wall() -> Wall {
    Wall::new(4.0, 3.0).unwrap()
}

fn renderer() -> Renderer {
    Renderer::new(RenderConfig::default(), SceneStyle::default())
}

#[test]
fn draw_wall_sizes_surface_and_paints_background_then_border() {
    let mut r = renderer();
    r.draw_wall(&wall());
    assert_eq!((r.surface().width(), r.surface().height()), (320, 240));
    assert!(matches!(r.surface().ops()[0], DrawOp::Fill { .. }));
    assert!(matches!(r.surface().ops()[1], DrawOp::StrokeRect { .. }));
    assert_eq!(r.surface().op_count(), 2);
}

#[test]
fn drawing_a_new_wall_clears_previous_contents() {
    let mut r = renderer();
    r.draw_wall(&wall());
    r.draw_segment(&Waypoint::new(0.0, 0.0), &Waypoint::new(1.0, 0.0));
    r.draw_marker(&Waypoint::new(1.0, 0.0));
    assert_eq!(r.surface().op_count(), 4);

    r.draw_wall(&Wall::new(2.0, 2.0).unwrap());
    assert_eq!(r.surface().op_count(), 2);
    assert_eq!((r.surface().width(), r.surface().height()), (160, 160));
}

#[test]
fn reset_alone_leaves_an_empty_sized_surface() {
    let mut r = renderer();
    r.reset(&wall());
    assert!(r.has_scene());
    assert_eq!(r.surface().op_count(), 0);
    assert!(!r.surface().is_empty());
}

#[test]
fn obstacles_are_filled_from_their_top_left_pixel_corner() {
    let mut r = renderer();
    r.draw_wall(&wall());
    r.draw_obstacles(&[Obstacle::new(1.0, 1.0, 2.0, 1.0)]);
    let DrawOp::Fill { rect, color } = r.surface().ops()[2] else {
        panic!("expected obstacle fill");
    };
    assert_eq!(rect, Rect::new(80.0, 80.0, 240.0, 160.0));
    assert_eq!(color, SceneStyle::default().obstacle);
}

#[test]
fn segments_and_markers_are_y_flipped() {
    let mut r = renderer();
    r.draw_wall(&wall());
    r.draw_segment(&Waypoint::new(0.0, 0.0), &Waypoint::new(4.0, 3.0));
    r.draw_marker(&Waypoint::new(4.0, 3.0));

    let DrawOp::Line { from, to, width, .. } = r.surface().ops()[2] else {
        panic!("expected line");
    };
    assert_eq!(from, Point::new(0.0, 240.0));
    assert_eq!(to, Point::new(320.0, 0.0));
    assert_eq!(width, 2.0);

    let DrawOp::Disc { center, radius, .. } = r.surface().ops()[3] else {
        panic!("expected disc");
    };
    assert_eq!(center, Point::new(320.0, 0.0));
    assert_eq!(radius, 5.0);
}

#[test]
fn drawing_before_a_wall_is_ignored() {
    let mut r = renderer();
    r.draw_segment(&Waypoint::new(0.0, 0.0), &Waypoint::new(1.0, 0.0));
    r.draw_marker(&Waypoint::new(1.0, 0.0));
    r.draw_obstacles(&[Obstacle::new(0.0, 0.0, 1.0, 1.0)]);
    assert_eq!(r.surface().op_count(), 0);
    assert!(!r.has_scene());
}

#[test]
fn fractional_surface_sizes_round_to_whole_pixels() {
    let mut r = renderer();
    r.draw_wall(&Wall::new(0.7, 0.3).unwrap());
    assert_eq!((r.surface().width(), r.surface().height()), (56, 24));
}
