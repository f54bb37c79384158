use super::model::{FocusMark, State, TileGeometry};
use super::{CENTER_CIRCLE_FACTOR, DETAIL_MARGIN, DIMMED_ALPHA, HIGHLIGHT_WIDTH, TILE_ALPHA};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use orbitcam::content::Topic;
use orbitcam::geometry::Point;
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn circle(cr: &Context, center: Point, radius: f64) {
    cr.new_sub_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    center: Point,
    size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)?;
    }
    Ok(())
}

struct TileRenderer<'a> {
    topic: &'a Topic,
    geometry: &'a TileGeometry,
    mark: FocusMark,
    highlighted: bool,
    font_size: f64,
}

impl TileRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let state = TileState::resolve(self.mark, self.highlighted);
        let center = self.geometry.rect.center();
        let radius = self.geometry.rect.width / 2.0;

        set_color(cr, self.topic.color.to_srgba(state.alpha()));
        circle(cr, center, radius);
        cr.fill()?;

        if state == TileState::Highlighted {
            set_color(cr, colors.highlight);
            cr.set_line_width(HIGHLIGHT_WIDTH);
            circle(cr, center, radius + HIGHLIGHT_WIDTH);
            cr.stroke()?;
        }

        let mut text = colors.text;
        text.alpha *= state.alpha();
        draw_centered_text(cr, self.topic.title.as_str(), center, self.font_size, text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileState {
    Focused,
    Highlighted,
    Dimmed,
    Idle,
}

impl TileState {
    /// Focus marks win over the keyboard highlight.
    fn resolve(mark: FocusMark, highlighted: bool) -> Self {
        match mark {
            FocusMark::Focused => Self::Focused,
            FocusMark::Dimmed => Self::Dimmed,
            FocusMark::None if highlighted => Self::Highlighted,
            FocusMark::None => Self::Idle,
        }
    }

    fn alpha(&self) -> f64 {
        match self {
            Self::Dimmed => DIMMED_ALPHA,
            Self::Focused | Self::Highlighted | Self::Idle => TILE_ALPHA,
        }
    }
}

pub fn draw(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.backdrop);
    cr.paint()?;

    cr.save()?;
    apply_camera(cr, state);

    draw_center_circle(cr, state, colors)?;

    for (i, ((topic, geometry), mark)) in zip(zip(&state.deck.topics, &state.tiles), &state.marks).enumerate() {
        TileRenderer {
            topic,
            geometry,
            mark: *mark,
            highlighted: state.highlight == Some(i),
            font_size: state.layout.font_sizes.tile,
        }
        .draw(cr, colors)?;
    }

    if state.detail_visible {
        draw_children(cr, state, colors)?;
    }
    cr.restore()?;

    draw_detail(cr, state, colors)
}

/// Mirrors `CameraTransform::project` about the window center.
fn apply_camera(cr: &Context, state: &State) {
    let t = state.transform;
    let o = state.ring_center();
    cr.translate(o.x, o.y);
    cr.scale(t.scale, t.scale);
    cr.translate(t.scale * t.tx - o.x, t.scale * t.ty - o.y);
}

fn draw_center_circle(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.center_circle);
    circle(cr, state.ring_center(), state.layout.radius * CENTER_CIRCLE_FACTOR);
    cr.fill()
}

fn draw_children(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(tile) = state.focused_tile() else {
        return Ok(());
    };
    let Some(topic) = state.deck.get(tile.id) else {
        return Ok(());
    };

    let parent = tile.rect.center();
    let radius = tile.child_size / 2.0;
    // on-screen size stays at label_focus whatever the zoom
    let font_size = state.layout.font_sizes.label_focus / state.transform.scale.max(1.0);

    for (i, (center, subtopic)) in zip(&tile.children, topic.visible_subtopics()).enumerate() {
        set_color(cr, topic.color.to_srgba(0.6));
        cr.set_line_width(1.5);
        cr.move_to(parent.x, parent.y);
        cr.line_to(center.x, center.y);
        cr.stroke()?;

        set_color(cr, colors.child);
        circle(cr, *center, radius);
        cr.fill()?;

        if state.selected_child == Some(i) {
            set_color(cr, colors.highlight);
            cr.set_line_width(HIGHLIGHT_WIDTH / 2.0);
            circle(cr, *center, radius);
            cr.stroke()?;
        }

        if state.is_bookmarked(tile.id, i) {
            // small dot on the upper right rim
            let mark = Point::new(center.x + radius * 0.7, center.y - radius * 0.7);
            set_color(cr, colors.highlight);
            circle(cr, mark, radius * 0.2);
            cr.fill()?;
        }

        draw_centered_text(cr, subtopic.title.as_str(), *center, font_size, colors.text)?;
    }
    Ok(())
}

/// Title of the selected subtopic, drawn unzoomed along the bottom edge.
fn draw_detail(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if !state.detail_visible {
        return Ok(());
    }
    let Some(title) = state.selected_child_title() else {
        return Ok(());
    };
    let anchor = Point::new(state.viewport.width / 2.0, state.viewport.height - DETAIL_MARGIN);
    draw_centered_text(cr, title, anchor, state.layout.font_sizes.title, colors.text)
}
