use super::{
    MAX_RADIUS_FACTOR, MAX_TILE_SIZE, MIN_RADIUS, MIN_TILE_SIZE, RADIUS_FACTOR,
    RADIUS_FACTOR_NARROW, RADIUS_FACTOR_ULTRAWIDE, TILE_SIZE_FACTOR, TILE_SIZE_FACTOR_NARROW,
    TILE_SIZE_FACTOR_ULTRAWIDE, ring_angle,
};
use crate::geometry::{Point, Rect, Size, clamp};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    Portrait,
    Narrow,
    Standard,
    Wide,
    Ultrawide,
}

impl AspectClass {
    pub fn classify(aspect_ratio: f64) -> Self {
        if aspect_ratio < 1.0 {
            Self::Portrait
        } else if aspect_ratio < 1.4 {
            Self::Narrow
        } else if aspect_ratio > 2.0 {
            Self::Ultrawide
        } else if aspect_ratio > 1.6 {
            Self::Wide
        } else {
            Self::Standard
        }
    }

    pub fn is_ultrawide(&self) -> bool {
        *self == Self::Ultrawide
    }

    /// Portrait viewports are narrow too.
    pub fn is_narrow(&self) -> bool {
        matches!(self, Self::Narrow | Self::Portrait)
    }

    pub fn is_portrait(&self) -> bool {
        *self == Self::Portrait
    }

    fn radius_factor(&self) -> f64 {
        if self.is_ultrawide() {
            RADIUS_FACTOR_ULTRAWIDE
        } else if self.is_narrow() {
            RADIUS_FACTOR_NARROW
        } else {
            RADIUS_FACTOR
        }
    }

    fn tile_size_factor(&self) -> f64 {
        if self.is_ultrawide() {
            TILE_SIZE_FACTOR_ULTRAWIDE
        } else if self.is_narrow() {
            TILE_SIZE_FACTOR_NARROW
        } else {
            TILE_SIZE_FACTOR
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    pub title: f64,
    pub tile: f64,
    pub label_idle: f64,
    pub label_focus: f64,
    pub body: f64,
}

impl FontSizes {
    fn fluid(vmin: f64) -> Self {
        Self {
            title: clamp(vmin * 0.035, 24.0, 56.0),
            tile: clamp(vmin * 0.022, 14.0, 28.0),
            label_idle: clamp(vmin * 0.012, 10.0, 16.0),
            label_focus: clamp(vmin * 0.04, 20.0, 56.0),
            body: clamp(vmin * 0.018, 14.0, 22.0),
        }
    }
}

/// 8px-based spacing scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    pub space1: f64,
    pub space2: f64,
    pub space3: f64,
    pub space4: f64,
    pub space5: f64,
    pub space6: f64,
}

impl Spacing {
    fn fluid(vmin: f64) -> Self {
        let base = clamp(vmin * 0.01, 4.0, 16.0);
        Self {
            space1: base * 0.5,
            space2: base,
            space3: base * 1.5,
            space4: base * 2.0,
            space5: base * 3.0,
            space6: base * 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelOffsets {
    pub offset_x: f64,
    pub offset_y: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TilePosition {
    pub center: Point,
    pub angle: f64,
}

/// Responsive values for the main topic ring. Coordinates are relative to the
/// top-left corner of the ring container (`container_size` square).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuLayout {
    pub viewport: Size,
    pub aspect_ratio: f64,
    pub vmin: f64,
    pub aspect: AspectClass,
    pub radius: f64,
    pub tile_size: f64,
    pub container_size: f64,
    pub aspect_stretch_x: f64,
    pub aspect_stretch_y: f64,
    pub center: Point,
    pub font_sizes: FontSizes,
    pub spacing: Spacing,
    pub label_offsets: LabelOffsets,
    pub tile_positions: Vec<TilePosition>,
}

impl MenuLayout {
    pub fn compute(viewport: Size, tile_count: usize) -> Self {
        let vmin = viewport.vmin();
        let aspect_ratio = viewport.width / viewport.height;
        let aspect = AspectClass::classify(aspect_ratio);

        // the 200px floor wins over the 45% ceiling on tiny viewports
        let radius = (vmin * aspect.radius_factor())
            .min(vmin * MAX_RADIUS_FACTOR)
            .max(MIN_RADIUS);
        let tile_size = clamp(vmin * aspect.tile_size_factor(), MIN_TILE_SIZE, MAX_TILE_SIZE);

        // purely circular, no stretch
        let (aspect_stretch_x, aspect_stretch_y) = (1.0, 1.0);

        let font_sizes = FontSizes::fluid(vmin);
        let spacing = Spacing::fluid(vmin);
        let label_offsets = LabelOffsets {
            offset_x: spacing.space3,
            offset_y: spacing.space2,
            gap: spacing.space1,
        };

        let container_size = radius * 2.0 + tile_size + spacing.space6;
        let center = Point::new(container_size / 2.0, container_size / 2.0);

        let tile_positions = (0..tile_count)
            .map(|i| {
                let angle = ring_angle(i, tile_count);
                TilePosition {
                    center: Point::new(
                        center.x + radius * aspect_stretch_x * angle.cos(),
                        center.y + radius * aspect_stretch_y * angle.sin(),
                    ),
                    angle,
                }
            })
            .collect();

        Self {
            viewport,
            aspect_ratio,
            vmin,
            aspect,
            radius,
            tile_size,
            container_size,
            aspect_stretch_x,
            aspect_stretch_y,
            center,
            font_sizes,
            spacing,
            label_offsets,
            tile_positions,
        }
    }

    /// Top-left of the ring container when it is centered in the viewport.
    pub fn screen_origin(&self) -> Point {
        let c = self.viewport.center();
        let half = self.container_size / 2.0;
        Point::new(c.x - half, c.y - half)
    }

    /// Tile boxes in viewport coordinates, ring centered on screen.
    pub fn tile_rects(&self) -> Vec<Rect> {
        let origin = self.screen_origin();
        self.tile_positions
            .iter()
            .map(|pos| {
                let c = Point::new(origin.x + pos.center.x, origin.y + pos.center.y);
                Rect::centered_at(c, self.tile_size, self.tile_size)
            })
            .collect()
    }

    pub fn describe(&self) -> String {
        format!(
            "{}x{} ({:.2}) [{}]",
            self.viewport.width, self.viewport.height, self.aspect_ratio, self.aspect
        )
    }

    /// Custom properties mirroring every derived value, in a stable order.
    pub fn custom_properties(&self) -> Vec<(&'static str, String)> {
        let px = |v: f64| format!("{v}px");
        vec![
            ("--menu-radius", px(self.radius)),
            ("--tile-size", px(self.tile_size)),
            ("--aspect-stretch-x", self.aspect_stretch_x.to_string()),
            ("--aspect-stretch-y", self.aspect_stretch_y.to_string()),
            ("--font-title", px(self.font_sizes.title)),
            ("--font-tile", px(self.font_sizes.tile)),
            ("--font-label-idle", px(self.font_sizes.label_idle)),
            ("--font-label-focus", px(self.font_sizes.label_focus)),
            ("--font-body", px(self.font_sizes.body)),
            ("--space-1", px(self.spacing.space1)),
            ("--space-2", px(self.spacing.space2)),
            ("--space-3", px(self.spacing.space3)),
            ("--space-4", px(self.spacing.space4)),
            ("--space-5", px(self.spacing.space5)),
            ("--space-6", px(self.spacing.space6)),
            ("--label-offset-x", px(self.label_offsets.offset_x)),
            ("--label-gap", px(self.label_offsets.gap)),
        ]
    }
}

/// Receiver of layout custom properties (a document root, a stylesheet builder).
pub trait StyleTarget {
    fn set_property(&mut self, name: &str, value: String);
}

impl StyleTarget for BTreeMap<String, String> {
    fn set_property(&mut self, name: &str, value: String) {
        self.insert(name.to_string(), value);
    }
}

pub fn apply_layout_to_css(layout: &MenuLayout, target: &mut impl StyleTarget) {
    for (name, value) in layout.custom_properties() {
        target.set_property(name, value);
    }
    log::debug!("Applied menu layout {}", layout.describe());
}

/// Anything that can be positioned by its top-left corner.
pub trait Placeable {
    fn set_origin(&mut self, origin: Point);
}

/// Centers each tile on its computed point. Tiles without a computed point keep
/// their current origin.
pub fn update_tile_positions<T: Placeable>(layout: &MenuLayout, tiles: &mut [T]) {
    let half = layout.tile_size / 2.0;
    for (tile, pos) in tiles.iter_mut().zip(&layout.tile_positions) {
        tile.set_origin(Point::new(pos.center.x - half, pos.center.y - half));
    }
}
