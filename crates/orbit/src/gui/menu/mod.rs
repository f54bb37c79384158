pub mod model;
pub mod view;

pub use model::{FocusMark, Hit, MindmapClass, NavigationLock, State, TileGeometry};
pub use view::draw;

pub const CHILD_SIZE_FACTOR: f64 = 0.42; // child tile diameter relative to the parent
pub const DIMMED_ALPHA: f64 = 0.35;
pub const TILE_ALPHA: f64 = 0.92;
pub const CENTER_CIRCLE_FACTOR: f64 = 0.18; // of the ring radius
pub const HIGHLIGHT_WIDTH: f64 = 4.0;
pub const DETAIL_MARGIN: f64 = 48.0;
