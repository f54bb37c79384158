//! Satellite placement of subtopic tiles around their parent tile.
//!
//! Positions are percentages of the parent tile size, relative to the parent
//! center. The mode is picked once per call from the parent's clearance to the
//! viewport edges; nothing here resolves overlaps iteratively.

use super::ring_angle;
use crate::content::Subtopic;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_RING_RADIUS: f64 = 50.0;
/// Pulls the ring in tight against the parent.
pub const RING_TIGHTNESS: f64 = 60.0;
pub const EDGE_MARGIN_FACTOR: f64 = 0.1;
pub const HALF_RING_SPREAD: f64 = PI * 0.9;
pub const STACK_OFFSET: f64 = 120.0;
pub const STACK_SPACING: f64 = 60.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    #[strum(serialize = "ring")]
    Ring,
    #[strum(serialize = "halfring", serialize = "half-ring", serialize = "half")]
    HalfRing,
    #[strum(serialize = "stack")]
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildLayoutOptions {
    /// Base ring radius in pixels before scaling to the parent size.
    pub ring_radius: f64,
}

impl Default for ChildLayoutOptions {
    fn default() -> Self {
        Self {
            ring_radius: DEFAULT_RING_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildPosition {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl ChildPosition {
    fn polar(radius: f64, angle: f64) -> Self {
        let Point { x, y } = Point::default().polar_offset(radius, angle);
        Self { x, y, angle }
    }

    /// Absolute center of the child given the parent's box.
    pub fn resolve(&self, parent: &Rect) -> Point {
        let c = parent.center();
        Point::new(
            c.x + self.x / 100.0 * parent.width,
            c.y + self.y / 100.0 * parent.height,
        )
    }
}

/// `parent` is the parent tile box in viewport coordinates.
pub fn compute_child_layout(
    parent: &Rect,
    child_count: usize,
    viewport: Size,
    preferred: LayoutMode,
    options: &ChildLayoutOptions,
) -> Vec<ChildPosition> {
    if child_count == 0 {
        return Vec::new();
    }

    let ring_radius = options.ring_radius;
    let radius_percent = ring_radius / (parent.width / 2.0) * RING_TIGHTNESS;
    let center = parent.center();

    match determine_layout_mode(center, viewport, ring_radius, preferred) {
        LayoutMode::Ring => ring_layout(child_count, radius_percent),
        LayoutMode::HalfRing => half_ring_layout(center, child_count, viewport, radius_percent),
        LayoutMode::Stack => stack_layout(center, child_count, viewport),
    }
}

pub fn determine_layout_mode(
    parent_center: Point,
    viewport: Size,
    ring_radius: f64,
    preferred: LayoutMode,
) -> LayoutMode {
    let margin = viewport.vmin() * EDGE_MARGIN_FACTOR;

    let to_left = parent_center.x - ring_radius;
    let to_right = viewport.width - parent_center.x - ring_radius;
    let to_top = parent_center.y - ring_radius;
    let to_bottom = viewport.height - parent_center.y - ring_radius;

    let cramped_x = to_left < margin && to_right < margin;
    let cramped_y = to_top < margin && to_bottom < margin;
    let near_edge = to_left < margin || to_right < margin || to_top < margin || to_bottom < margin;

    if cramped_x || cramped_y {
        LayoutMode::Stack
    } else if near_edge && preferred != LayoutMode::Ring {
        LayoutMode::HalfRing
    } else {
        preferred
    }
}

fn ring_layout(count: usize, radius: f64) -> Vec<ChildPosition> {
    (0..count)
        .map(|i| ChildPosition::polar(radius, ring_angle(i, count)))
        .collect()
}

fn half_ring_layout(
    parent_center: Point,
    count: usize,
    viewport: Size,
    radius: f64,
) -> Vec<ChildPosition> {
    let vc = viewport.center();
    // points from the viewport center toward the parent, then flipped so the
    // arc opens away from the nearest edge
    let base = (parent_center.y - vc.y).atan2(parent_center.x - vc.x) + PI;
    let start = base - HALF_RING_SPREAD / 2.0;

    (0..count)
        .map(|i| {
            let progress = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.5
            };
            ChildPosition::polar(radius, start + progress * HALF_RING_SPREAD)
        })
        .collect()
}

fn stack_layout(parent_center: Point, count: usize, viewport: Size) -> Vec<ChildPosition> {
    let on_left = parent_center.x < viewport.width / 2.0;
    let (x, angle) = if on_left {
        (STACK_OFFSET, 0.0)
    } else {
        (-STACK_OFFSET, PI)
    };
    let start_y = -((count - 1) as f64 * STACK_SPACING) / 2.0;

    (0..count)
        .map(|i| ChildPosition {
            x,
            y: start_y + i as f64 * STACK_SPACING,
            angle,
        })
        .collect()
}

/// Manual overrides win over computed positions, child by child.
pub fn resolve_child_positions(
    subtopics: &[Subtopic],
    computed: &[ChildPosition],
) -> Vec<ChildPosition> {
    computed
        .iter()
        .enumerate()
        .map(|(i, fallback)| {
            subtopics
                .get(i)
                .and_then(|s| s.position)
                .filter(Point::is_finite)
                .map(|p| ChildPosition {
                    x: p.x,
                    y: p.y,
                    angle: p.y.atan2(p.x),
                })
                .unwrap_or(*fallback)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const EPS: f64 = 1e-9;

    fn viewport() -> Size {
        Size::new(1920.0, 1080.0)
    }

    fn parent_at(x: f64, y: f64) -> Rect {
        Rect::centered_at(Point::new(x, y), 150.0, 150.0)
    }

    #[test]
    fn test_no_children() {
        let out = compute_child_layout(
            &parent_at(960.0, 540.0),
            0,
            viewport(),
            LayoutMode::Ring,
            &ChildLayoutOptions::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_ring_in_open_space() {
        let parent = parent_at(960.0, 540.0);
        let out = compute_child_layout(
            &parent,
            4,
            viewport(),
            LayoutMode::Ring,
            &ChildLayoutOptions::default(),
        );
        let radius = 50.0 / 75.0 * 60.0;

        assert_eq!(out.len(), 4);
        assert!((out[0].angle + FRAC_PI_2).abs() < EPS);
        assert!(out[0].x.abs() < EPS);
        assert!((out[0].y + radius).abs() < EPS);
        for pair in out.windows(2) {
            assert!((pair[1].angle - pair[0].angle - TAU / 4.0).abs() < EPS);
        }
    }

    #[test]
    fn test_mode_selection() {
        let vp = viewport();
        // margin = 108, ring radius = 50
        assert_eq!(
            determine_layout_mode(Point::new(960.0, 540.0), vp, 50.0, LayoutMode::HalfRing),
            LayoutMode::HalfRing
        );
        assert_eq!(
            determine_layout_mode(Point::new(100.0, 540.0), vp, 50.0, LayoutMode::HalfRing),
            LayoutMode::HalfRing
        );
        assert_eq!(
            determine_layout_mode(Point::new(500.0, 540.0), vp, 50.0, LayoutMode::Stack),
            LayoutMode::Stack
        );
        // forced ring survives a single crowded edge
        assert_eq!(
            determine_layout_mode(Point::new(100.0, 540.0), vp, 50.0, LayoutMode::Ring),
            LayoutMode::Ring
        );
        // both vertical edges crowded
        let short = Size::new(1920.0, 120.0);
        assert_eq!(
            determine_layout_mode(Point::new(960.0, 60.0), short, 50.0, LayoutMode::Ring),
            LayoutMode::Stack
        );
    }

    #[test]
    fn test_half_ring_opens_away_from_edge() {
        let parent = parent_at(100.0, 540.0);
        let out = compute_child_layout(
            &parent,
            3,
            viewport(),
            LayoutMode::HalfRing,
            &ChildLayoutOptions::default(),
        );
        // parent hugs the left edge: the arc faces right, middle child at 0 rad
        assert_eq!(out.len(), 3);
        assert!(out[1].angle.rem_euclid(TAU) < 1e-6 || out[1].angle.rem_euclid(TAU) > TAU - 1e-6);
        assert!(out[1].x > 0.0);
        assert!((out[2].angle - out[0].angle - HALF_RING_SPREAD).abs() < EPS);
    }

    #[test]
    fn test_half_ring_single_child_mid_arc() {
        let parent = parent_at(1820.0, 540.0);
        let out = compute_child_layout(
            &parent,
            1,
            viewport(),
            LayoutMode::HalfRing,
            &ChildLayoutOptions::default(),
        );
        // right edge: arc faces left
        assert!((out[0].angle - PI).abs() < EPS);
        assert!(out[0].x < 0.0);
    }

    #[test]
    fn test_stack_side_and_spacing() {
        let short = Size::new(1920.0, 120.0);
        let left = compute_child_layout(
            &parent_at(400.0, 60.0),
            3,
            short,
            LayoutMode::Ring,
            &ChildLayoutOptions::default(),
        );
        assert!(left.iter().all(|p| p.x == STACK_OFFSET && p.angle == 0.0));
        assert_eq!(
            left.iter().map(|p| p.y).collect::<Vec<_>>(),
            vec![-60.0, 0.0, 60.0]
        );

        let right = compute_child_layout(
            &parent_at(1500.0, 60.0),
            2,
            short,
            LayoutMode::Ring,
            &ChildLayoutOptions::default(),
        );
        assert!(right.iter().all(|p| p.x == -STACK_OFFSET && p.angle == PI));
        assert_eq!(
            right.iter().map(|p| p.y).collect::<Vec<_>>(),
            vec![-30.0, 30.0]
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let computed = ring_layout(3, 40.0);
        let subtopics = vec![
            Subtopic::new("a"),
            Subtopic::with_position("b", Point::new(0.0, 80.0)),
            Subtopic::with_position("c", Point::new(f64::NAN, 10.0)),
        ];
        let out = resolve_child_positions(&subtopics, &computed);

        assert_eq!(out[0], computed[0]);
        assert_eq!((out[1].x, out[1].y), (0.0, 80.0));
        assert!((out[1].angle - FRAC_PI_2).abs() < EPS);
        assert_eq!(out[2], computed[2]);
    }

    #[test]
    fn test_resolve_absolute() {
        let parent = Rect::new(100.0, 100.0, 200.0, 100.0);
        let pos = ChildPosition {
            x: 50.0,
            y: -100.0,
            angle: 0.0,
        };
        assert_eq!(pos.resolve(&parent), Point::new(300.0, 50.0));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("ring".parse::<LayoutMode>().unwrap(), LayoutMode::Ring);
        assert_eq!("HalfRing".parse::<LayoutMode>().unwrap(), LayoutMode::HalfRing);
        assert_eq!("half-ring".parse::<LayoutMode>().unwrap(), LayoutMode::HalfRing);
        assert_eq!("STACK".parse::<LayoutMode>().unwrap(), LayoutMode::Stack);
        assert!("spiral".parse::<LayoutMode>().is_err());
    }

    proptest! {
        #[test]
        fn mode_selection_is_deterministic(
            x in 0.0f64..1920.0,
            y in 0.0f64..1080.0,
            count in 1usize..7,
        ) {
            let parent = parent_at(x, y);
            let opts = ChildLayoutOptions::default();
            let a = compute_child_layout(&parent, count, viewport(), LayoutMode::HalfRing, &opts);
            let b = compute_child_layout(&parent, count, viewport(), LayoutMode::HalfRing, &opts);
            prop_assert_eq!(a, b);
            prop_assert_eq!(
                determine_layout_mode(parent.center(), viewport(), 50.0, LayoutMode::HalfRing),
                determine_layout_mode(parent.center(), viewport(), 50.0, LayoutMode::HalfRing)
            );
        }
    }
}
