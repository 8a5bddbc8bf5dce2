//! Hit testing: containment, topmost-shape lookup, bounding boxes and
//! resize handles.
//!
//! Everything here is a pure function of the shape values passed in.

use serde::{Deserialize, Serialize};
use visnotes_geometry::{
    Bounds, Point, near_any, point_in_ellipse, point_in_polygon, point_in_triangle,
    regular_polygon_vertices, star_vertices,
};

use crate::shape::{ArrowDirection, Shape, ShapeKind};

/// Handle hit radius in canvas units, larger than the drawn handle for touch
pub const HANDLE_HIT_RADIUS: f64 = 15.0;

/// Distance from a freehand sample that still counts as touching the stroke
pub const PATH_HIT_TOLERANCE: f64 = 10.0;

/// Heart containment box half-width as a fraction of its width
const HEART_HALF_WIDTH: f64 = 0.6;

/// Arrow head length as a fraction of its height
const ARROW_HEAD_RATIO: f64 = 0.4;

/// Arrow shaft thickness as a fraction of its width
const ARROW_SHAFT_RATIO: f64 = 0.4;

/// Corner handle of a shape's bounding geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// Kebab-case name, as serialized
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }

    /// Whether the handle sits on the left edge
    pub fn is_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::BottomLeft)
    }

    /// Whether the handle sits on the top edge
    pub fn is_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::TopRight)
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resize handle with its canvas position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleAnchor {
    pub handle: ResizeHandle,
    pub pos: Point,
}

impl HandleAnchor {
    fn new(handle: ResizeHandle, pos: Point) -> Self {
        Self { handle, pos }
    }
}

/// Outline vertices for the kinds tested with the ray-crossing rule
pub fn shape_vertices(shape: &Shape) -> Option<Vec<Point>> {
    let center = shape.anchor();
    match &shape.kind {
        ShapeKind::Star {
            points,
            inner_radius,
            outer_radius,
        } => Some(star_vertices(center, *outer_radius, *inner_radius, *points)),
        ShapeKind::Hexagon { size }
        | ShapeKind::Pentagon { size }
        | ShapeKind::Octagon { size }
        | ShapeKind::Heptagon { size } => {
            let sides = shape.shape_type().polygon_sides()?;
            Some(regular_polygon_vertices(center, *size, sides))
        }
        ShapeKind::Diamond { width, height } => Some(vec![
            Point::new(center.x, center.y - height / 2.0),
            Point::new(center.x + width / 2.0, center.y),
            Point::new(center.x, center.y + height / 2.0),
            Point::new(center.x - width / 2.0, center.y),
        ]),
        ShapeKind::Arrow {
            width,
            height,
            direction,
        } => Some(arrow_vertices(center, *width, *height, *direction)),
        _ => None,
    }
}

/// Seven-point arrow outline: tip, head barb, shaft, shaft, shaft, head barb
fn arrow_vertices(anchor: Point, width: f64, height: f64, direction: ArrowDirection) -> Vec<Point> {
    let Point { x, y } = anchor;
    let head = height * ARROW_HEAD_RATIO;
    let shaft = width * ARROW_SHAFT_RATIO;

    match direction {
        ArrowDirection::Up | ArrowDirection::Down => {
            let up = direction == ArrowDirection::Up;
            let tip_y = if up { y } else { y + height };
            let tail_y = if up { y + height } else { y };
            let head_y = if up { y + head } else { y + height - head };
            vec![
                Point::new(x, tip_y),
                Point::new(x - width / 2.0, head_y),
                Point::new(x - shaft / 2.0, head_y),
                Point::new(x - shaft / 2.0, tail_y),
                Point::new(x + shaft / 2.0, tail_y),
                Point::new(x + shaft / 2.0, head_y),
                Point::new(x + width / 2.0, head_y),
            ]
        }
        ArrowDirection::Left | ArrowDirection::Right => {
            let left = direction == ArrowDirection::Left;
            let tip_x = if left { x } else { x + width };
            let tail_x = if left { x + width } else { x };
            let head_x = if left { x + head } else { x + width - head };
            vec![
                Point::new(tip_x, y),
                Point::new(head_x, y - height / 2.0),
                Point::new(head_x, y - shaft / 2.0),
                Point::new(tail_x, y - shaft / 2.0),
                Point::new(tail_x, y + shaft / 2.0),
                Point::new(head_x, y + shaft / 2.0),
                Point::new(head_x, y + height / 2.0),
            ]
        }
    }
}

/// Containment test. Edges count as inside for the box, circle and
/// ellipse kinds.
///
/// Hearts are tested against their bounding box and freehand paths by
/// proximity to any sample; both are approximations.
pub fn is_point_in_shape(point: Point, shape: &Shape) -> bool {
    let (x, y) = (shape.x, shape.y);
    match &shape.kind {
        ShapeKind::Rectangle { width, height } => {
            Bounds::from_rect(x, y, *width, *height).contains(point)
        }
        ShapeKind::Circle { radius } => point.distance_to(shape.anchor()) <= *radius,
        ShapeKind::Triangle { width, height } => point_in_triangle(
            point,
            Point::new(x, y + height),
            Point::new(x + width / 2.0, y),
            Point::new(x + width, y + height),
        ),
        ShapeKind::Oval { rx, ry } => point_in_ellipse(point, Point::new(x + rx, y + ry), *rx, *ry),
        ShapeKind::Heart { .. } => shape_bounds(shape).contains(point),
        ShapeKind::Path { points } => near_any(point, points, PATH_HIT_TOLERANCE),
        ShapeKind::Star { .. }
        | ShapeKind::Hexagon { .. }
        | ShapeKind::Pentagon { .. }
        | ShapeKind::Octagon { .. }
        | ShapeKind::Heptagon { .. }
        | ShapeKind::Diamond { .. }
        | ShapeKind::Arrow { .. } => shape_vertices(shape)
            .map(|vertices| point_in_polygon(point, &vertices))
            .unwrap_or(false),
    }
}

/// Topmost shape containing `point`.
///
/// Highest `z_index` wins; among equal maxima the earliest shape in the
/// slice wins.
pub fn find_shape_at_point(point: Point, shapes: &[Shape]) -> Option<&Shape> {
    shapes
        .iter()
        .filter(|shape| is_point_in_shape(point, shape))
        .fold(None, |topmost: Option<&Shape>, shape| match topmost {
            Some(top) if shape.z_index <= top.z_index => Some(top),
            _ => Some(shape),
        })
}

/// Axis-aligned bounding box of a shape's outline
pub fn shape_bounds(shape: &Shape) -> Bounds {
    let (x, y) = (shape.x, shape.y);
    let center = shape.anchor();
    match &shape.kind {
        ShapeKind::Rectangle { width, height } | ShapeKind::Triangle { width, height } => {
            Bounds::from_rect(x, y, *width, *height)
        }
        ShapeKind::Circle { radius } => Bounds::from_center(center, *radius, *radius),
        ShapeKind::Oval { rx, ry } => Bounds::from_rect(x, y, rx * 2.0, ry * 2.0),
        ShapeKind::Star { outer_radius, .. } => {
            Bounds::from_center(center, *outer_radius, *outer_radius)
        }
        ShapeKind::Hexagon { size }
        | ShapeKind::Pentagon { size }
        | ShapeKind::Octagon { size }
        | ShapeKind::Heptagon { size } => Bounds::from_center(center, *size, *size),
        ShapeKind::Diamond { width, height } => {
            Bounds::from_center(center, width / 2.0, height / 2.0)
        }
        ShapeKind::Heart { width, height } => {
            let half = width * HEART_HALF_WIDTH;
            Bounds::new(x - half, y, x + half, y + height)
        }
        ShapeKind::Arrow {
            width,
            height,
            direction,
        } => {
            if direction.is_vertical() {
                Bounds::new(x - width / 2.0, y, x + width / 2.0, y + height)
            } else {
                Bounds::new(x, y - height / 2.0, x + width, y + height / 2.0)
            }
        }
        ShapeKind::Path { points } => {
            Bounds::from_points(points).unwrap_or_else(|| Bounds::new(x, y, x, y))
        }
    }
}

/// Union of every shape's bounds, `None` for an empty collection
pub fn bounds_of<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Bounds> {
    shapes
        .into_iter()
        .map(shape_bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Handle anchors in hit-test order.
///
/// Box-like and radial kinds get the four corners of their bounds,
/// clockwise from the top-left for circles and row by row for the rest.
/// Triangles get their two base corners and the apex (reported as
/// `TopRight`). Freehand paths have none.
pub fn resize_handles(shape: &Shape) -> Vec<HandleAnchor> {
    match &shape.kind {
        ShapeKind::Path { .. } => Vec::new(),
        ShapeKind::Triangle { width, height } => {
            let (x, y) = (shape.x, shape.y);
            vec![
                HandleAnchor::new(ResizeHandle::BottomLeft, Point::new(x, y + height)),
                HandleAnchor::new(ResizeHandle::TopRight, Point::new(x + width / 2.0, y)),
                HandleAnchor::new(ResizeHandle::BottomRight, Point::new(x + width, y + height)),
            ]
        }
        ShapeKind::Circle { .. } => {
            let b = shape_bounds(shape);
            vec![
                HandleAnchor::new(ResizeHandle::TopLeft, b.top_left()),
                HandleAnchor::new(ResizeHandle::TopRight, b.top_right()),
                HandleAnchor::new(ResizeHandle::BottomRight, b.bottom_right()),
                HandleAnchor::new(ResizeHandle::BottomLeft, b.bottom_left()),
            ]
        }
        _ => {
            let b = shape_bounds(shape);
            vec![
                HandleAnchor::new(ResizeHandle::TopLeft, b.top_left()),
                HandleAnchor::new(ResizeHandle::TopRight, b.top_right()),
                HandleAnchor::new(ResizeHandle::BottomLeft, b.bottom_left()),
                HandleAnchor::new(ResizeHandle::BottomRight, b.bottom_right()),
            ]
        }
    }
}

/// Handle within [`HANDLE_HIT_RADIUS`] of `point`
pub fn find_resize_handle(point: Point, shape: &Shape) -> Option<ResizeHandle> {
    find_resize_handle_within(point, shape, HANDLE_HIT_RADIUS)
}

/// First handle (in [`resize_handles`] order) within `radius` of `point`
pub fn find_resize_handle_within(point: Point, shape: &Shape, radius: f64) -> Option<ResizeHandle> {
    resize_handles(shape)
        .into_iter()
        .find(|anchor| (point.x - anchor.pos.x).hypot(point.y - anchor.pos.y) <= radius)
        .map(|anchor| anchor.handle)
}

impl Shape {
    /// See [`is_point_in_shape`]
    pub fn contains(&self, point: Point) -> bool {
        is_point_in_shape(point, self)
    }

    /// See [`shape_bounds`]
    pub fn bounds(&self) -> Bounds {
        shape_bounds(self)
    }

    /// See [`resize_handles`]
    pub fn resize_handles(&self) -> Vec<HandleAnchor> {
        resize_handles(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeId;
    use proptest::prelude::*;

    fn shape(id: &str, x: f64, y: f64, kind: ShapeKind) -> Shape {
        Shape::new(ShapeId::from(id), x, y, kind)
    }

    fn rect_100() -> Shape {
        shape(
            "rect",
            100.0,
            100.0,
            ShapeKind::Rectangle {
                width: 100.0,
                height: 100.0,
            },
        )
    }

    #[test]
    fn rectangle_containment() {
        let rect = rect_100();
        assert!(is_point_in_shape(Point::new(150.0, 150.0), &rect));
        assert!(!is_point_in_shape(Point::new(50.0, 50.0), &rect));
        // edges are inclusive
        assert!(rect.contains(Point::new(100.0, 200.0)));
        assert!(rect.contains(Point::new(200.0, 100.0)));
    }

    #[test]
    fn circle_containment() {
        let circle = shape("c", 200.0, 200.0, ShapeKind::Circle { radius: 50.0 });
        assert!(is_point_in_shape(Point::new(249.0, 200.0), &circle));
        assert!(is_point_in_shape(Point::new(250.0, 200.0), &circle));
        assert!(!is_point_in_shape(Point::new(300.0, 300.0), &circle));
    }

    #[test]
    fn triangle_uses_apex_at_top_center() {
        let tri = shape(
            "t",
            0.0,
            0.0,
            ShapeKind::Triangle {
                width: 100.0,
                height: 100.0,
            },
        );
        assert!(tri.contains(Point::new(50.0, 60.0)));
        assert!(tri.contains(Point::new(50.0, 0.0)));
        // top corners of the box are outside the triangle
        assert!(!tri.contains(Point::new(5.0, 5.0)));
        assert!(!tri.contains(Point::new(95.0, 5.0)));
    }

    #[test]
    fn oval_anchor_is_top_left() {
        let oval = shape("o", 0.0, 0.0, ShapeKind::Oval { rx: 60.0, ry: 40.0 });
        assert!(oval.contains(Point::new(60.0, 40.0)));
        assert!(oval.contains(Point::new(120.0, 40.0)));
        assert!(!oval.contains(Point::new(2.0, 2.0)));
        assert_eq!(oval.bounds(), Bounds::new(0.0, 0.0, 120.0, 80.0));
    }

    #[test]
    fn star_and_polygons() {
        let star = shape(
            "s",
            0.0,
            0.0,
            ShapeKind::Star {
                points: 5,
                inner_radius: 25.0,
                outer_radius: 50.0,
            },
        );
        assert!(star.contains(Point::new(0.0, 0.0)));
        assert!(star.contains(Point::new(0.0, -45.0)));
        // between two tips, outside the inner radius
        assert!(!star.contains(Point::new(0.0, 40.0)));

        let hex = shape("h", 0.0, 0.0, ShapeKind::Hexagon { size: 50.0 });
        assert!(hex.contains(Point::new(0.0, 0.0)));
        assert!(!hex.contains(Point::new(49.0, -45.0)));

        for kind in [
            ShapeKind::Pentagon { size: 50.0 },
            ShapeKind::Heptagon { size: 50.0 },
            ShapeKind::Octagon { size: 50.0 },
        ] {
            let poly = shape("p", 10.0, 10.0, kind);
            assert!(poly.contains(Point::new(10.0, 10.0)));
            assert!(!poly.contains(Point::new(70.0, 70.0)));
        }
    }

    #[test]
    fn diamond_is_a_rhombus_around_its_center() {
        let d = shape(
            "d",
            100.0,
            100.0,
            ShapeKind::Diamond {
                width: 80.0,
                height: 100.0,
            },
        );
        assert!(d.contains(Point::new(100.0, 100.0)));
        assert!(d.contains(Point::new(100.0, 60.0)));
        // bounding box corner is outside the rhombus
        assert!(!d.contains(Point::new(62.0, 52.0)));
    }

    #[test]
    fn arrow_follows_direction() {
        let right = shape(
            "a",
            0.0,
            0.0,
            ShapeKind::Arrow {
                width: 100.0,
                height: 60.0,
                direction: ArrowDirection::Right,
            },
        );
        // shaft
        assert!(right.contains(Point::new(10.0, 0.0)));
        // head barb
        assert!(right.contains(Point::new(85.0, 10.0)));
        // beside the shaft
        assert!(!right.contains(Point::new(10.0, 25.0)));
        assert_eq!(right.bounds(), Bounds::new(0.0, -30.0, 100.0, 30.0));

        let up = shape(
            "u",
            0.0,
            0.0,
            ShapeKind::Arrow {
                width: 60.0,
                height: 100.0,
                direction: ArrowDirection::Up,
            },
        );
        assert!(up.contains(Point::new(0.0, 5.0)));
        assert!(up.contains(Point::new(0.0, 90.0)));
        assert!(!up.contains(Point::new(25.0, 90.0)));
    }

    #[test]
    fn heart_uses_bounding_box() {
        let heart = shape(
            "h",
            100.0,
            100.0,
            ShapeKind::Heart {
                width: 80.0,
                height: 80.0,
            },
        );
        assert!(heart.contains(Point::new(148.0, 100.0)));
        assert!(!heart.contains(Point::new(149.0, 100.0)));
        assert!(!heart.contains(Point::new(100.0, 99.0)));
    }

    #[test]
    fn path_proximity() {
        let path = shape(
            "p",
            0.0,
            0.0,
            ShapeKind::Path {
                points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            },
        );
        assert!(path.contains(Point::new(100.0, 10.0)));
        // midpoint of a segment is far from both samples
        assert!(!path.contains(Point::new(50.0, 0.0)));
        assert!(resize_handles(&path).is_empty());
        assert_eq!(path.bounds(), Bounds::new(0.0, 0.0, 100.0, 0.0));
    }

    #[test]
    fn topmost_shape_wins() {
        let low = rect_100().with_z_index(1);
        let high = shape("high", 150.0, 150.0, ShapeKind::Circle { radius: 30.0 }).with_z_index(5);
        let shapes = vec![high.clone(), low.clone()];

        let hit = find_shape_at_point(Point::new(150.0, 150.0), &shapes);
        assert_eq!(hit.map(|s| s.id.as_str()), Some("high"));

        let hit = find_shape_at_point(Point::new(110.0, 110.0), &shapes);
        assert_eq!(hit.map(|s| s.id.as_str()), Some("rect"));

        assert!(find_shape_at_point(Point::new(0.0, 0.0), &shapes).is_none());
        assert!(find_shape_at_point(Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn equal_z_index_earliest_wins() {
        let first = shape("first", 0.0, 0.0, ShapeKind::Circle { radius: 10.0 }).with_z_index(3);
        let second = shape("second", 0.0, 0.0, ShapeKind::Circle { radius: 10.0 }).with_z_index(3);
        let shapes = vec![first, second];
        let hit = find_shape_at_point(Point::ORIGIN, &shapes);
        assert_eq!(hit.map(|s| s.id.as_str()), Some("first"));
    }

    #[test]
    fn rectangle_handles() {
        let rect = rect_100();
        assert_eq!(
            find_resize_handle(Point::new(200.0, 200.0), &rect),
            Some(ResizeHandle::BottomRight)
        );
        assert_eq!(
            find_resize_handle(Point::new(100.0, 100.0), &rect),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(find_resize_handle(Point::new(150.0, 150.0), &rect), None);
        assert_eq!(
            find_resize_handle(Point::new(210.0, 110.0), &rect),
            Some(ResizeHandle::TopRight)
        );
    }

    #[test]
    fn radial_handles_sit_on_the_circumscribed_square() {
        let circle = shape("c", 200.0, 200.0, ShapeKind::Circle { radius: 50.0 });
        assert_eq!(
            find_resize_handle(Point::new(150.0, 250.0), &circle),
            Some(ResizeHandle::BottomLeft)
        );
        let star = shape(
            "s",
            0.0,
            0.0,
            ShapeKind::Star {
                points: 5,
                inner_radius: 25.0,
                outer_radius: 50.0,
            },
        );
        assert_eq!(
            find_resize_handle(Point::new(50.0, -50.0), &star),
            Some(ResizeHandle::TopRight)
        );
    }

    #[test]
    fn circle_handles_run_clockwise() {
        let circle = shape("c", 0.0, 0.0, ShapeKind::Circle { radius: 10.0 });
        let handles: Vec<_> = resize_handles(&circle).iter().map(|h| h.handle).collect();
        assert_eq!(
            handles,
            vec![
                ResizeHandle::TopLeft,
                ResizeHandle::TopRight,
                ResizeHandle::BottomRight,
                ResizeHandle::BottomLeft
            ]
        );
        // equidistant from both bottom handles
        assert_eq!(
            find_resize_handle(Point::new(0.0, 10.0), &circle),
            Some(ResizeHandle::BottomRight)
        );
    }

    #[test]
    fn triangle_apex_is_the_top_right_handle() {
        let tri = shape(
            "t",
            0.0,
            0.0,
            ShapeKind::Triangle {
                width: 100.0,
                height: 100.0,
            },
        );
        let handles: Vec<_> = resize_handles(&tri).iter().map(|h| h.handle).collect();
        assert_eq!(
            handles,
            vec![
                ResizeHandle::BottomLeft,
                ResizeHandle::TopRight,
                ResizeHandle::BottomRight
            ]
        );
        assert_eq!(
            find_resize_handle(Point::new(50.0, 0.0), &tri),
            Some(ResizeHandle::TopRight)
        );
        assert_eq!(find_resize_handle(Point::new(0.0, 0.0), &tri), None);
    }

    #[test]
    fn custom_radius() {
        let rect = rect_100();
        let p = Point::new(120.0, 100.0);
        assert_eq!(find_resize_handle(p, &rect), None);
        assert_eq!(
            find_resize_handle_within(p, &rect, 25.0),
            Some(ResizeHandle::TopLeft)
        );
    }

    #[test]
    fn bounds_of_collection() {
        let shapes = vec![
            rect_100(),
            shape("c", 0.0, 0.0, ShapeKind::Circle { radius: 10.0 }),
        ];
        assert_eq!(bounds_of(&shapes), Some(Bounds::new(-10.0, -10.0, 200.0, 200.0)));
        let empty: Vec<Shape> = Vec::new();
        assert_eq!(bounds_of(&empty), None);
    }

    #[test]
    fn handle_names_are_kebab_case() {
        assert_eq!(ResizeHandle::BottomRight.to_string(), "bottom-right");
        let json = serde_json::to_value(ResizeHandle::TopLeft).unwrap();
        assert_eq!(json, "top-left");
    }

    proptest! {
        #[test]
        fn far_points_hit_no_handle(
            px in -1000.0f64..1000.0,
            py in -1000.0f64..1000.0,
        ) {
            let rect = rect_100();
            let near = resize_handles(&rect)
                .iter()
                .any(|h| h.pos.distance_to(Point::new(px, py)) <= HANDLE_HIT_RADIUS);
            prop_assert_eq!(find_resize_handle(Point::new(px, py), &rect).is_some(), near);
        }

        #[test]
        fn contained_points_are_inside_bounds(
            px in -100.0f64..300.0,
            py in -100.0f64..300.0,
            kind_index in 0usize..6,
        ) {
            let kind = match kind_index {
                0 => ShapeKind::Circle { radius: 50.0 },
                1 => ShapeKind::Oval { rx: 60.0, ry: 40.0 },
                2 => ShapeKind::Hexagon { size: 50.0 },
                3 => ShapeKind::Diamond { width: 80.0, height: 100.0 },
                4 => ShapeKind::Star { points: 5, inner_radius: 25.0, outer_radius: 50.0 },
                _ => ShapeKind::Arrow { width: 100.0, height: 60.0, direction: ArrowDirection::Down },
            };
            let s = shape("s", 100.0, 100.0, kind);
            let p = Point::new(px, py);
            if s.contains(p) {
                prop_assert!(s.bounds().contains(p));
            }
        }
    }
}
