use std::f64::consts::{FRAC_PI_2, TAU};

pub mod child;
pub mod menu;

pub use child::{
    ChildLayoutOptions, ChildPosition, LayoutMode, compute_child_layout, determine_layout_mode,
    resolve_child_positions,
};
pub use menu::{
    AspectClass, FontSizes, LabelOffsets, MenuLayout, Placeable, Spacing, StyleTarget,
    TilePosition, apply_layout_to_css, update_tile_positions,
};

pub const START_OFFSET: f64 = -FRAC_PI_2; // 12 o'clock

pub const MIN_RADIUS: f64 = 200.0;
pub const MAX_RADIUS_FACTOR: f64 = 0.45;
pub const MIN_TILE_SIZE: f64 = 90.0;
pub const MAX_TILE_SIZE: f64 = 220.0;

pub const RADIUS_FACTOR: f64 = 0.28;
pub const RADIUS_FACTOR_ULTRAWIDE: f64 = 0.32;
pub const RADIUS_FACTOR_NARROW: f64 = 0.24;

pub const TILE_SIZE_FACTOR: f64 = 0.14;
pub const TILE_SIZE_FACTOR_ULTRAWIDE: f64 = 0.12;
pub const TILE_SIZE_FACTOR_NARROW: f64 = 0.16;

/// Angle of slot `index` out of `count`, clockwise from the top.
pub fn ring_angle(index: usize, count: usize) -> f64 {
    (index as f64 / count as f64) * TAU + START_OFFSET
}
