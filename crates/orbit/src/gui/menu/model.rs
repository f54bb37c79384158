use crate::config::LayoutConfig;
use crate::gui::menu::CHILD_SIZE_FACTOR;
use orbitcam::camera::{
    AnimationEvent, AnimationKind, AnimationPhase, CameraState, CameraTransform,
    KeyboardNavigation,
};
use orbitcam::content::{Deck, Topic, TopicId};
use orbitcam::geometry::{Point, Rect, Size};
use orbitcam::layout::{
    ChildLayoutOptions, LayoutMode, MenuLayout, Placeable, compute_child_layout,
    resolve_child_positions, update_tile_positions,
};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use strum::{AsRefStr, Display as StrumDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum FocusMark {
    #[default]
    None,
    Focused,
    Dimmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MindmapClass {
    #[default]
    Idle,
    Focused,
}

/// Shared enable flag handed to the camera; arrow keys check it before moving.
#[derive(Debug, Clone)]
pub struct NavigationLock(Rc<Cell<bool>>);

impl Default for NavigationLock {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl NavigationLock {
    pub fn enabled(&self) -> bool {
        self.0.get()
    }
}

impl KeyboardNavigation for NavigationLock {
    fn set_keyboard_enabled(&mut self, enabled: bool) {
        log::debug!("Keyboard navigation {}", if enabled { "on" } else { "off" });
        self.0.set(enabled);
    }
}

/// A topic tile in scene coordinates (the unzoomed window).
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometry {
    pub id: TopicId,
    pub rect: Rect,
    pub angle: f64,
    /// Absolute centers of the visible subtopics.
    pub children: Vec<Point>,
    pub child_size: f64,
}

impl TileGeometry {
    fn new(id: TopicId, size: f64) -> Self {
        Self {
            id,
            rect: Rect::new(0.0, 0.0, size, size),
            angle: 0.0,
            children: Vec::new(),
            child_size: size * CHILD_SIZE_FACTOR,
        }
    }

    fn place_children(
        &mut self,
        topic: &Topic,
        viewport: Size,
        mode: LayoutMode,
        options: &ChildLayoutOptions,
    ) {
        let visible = topic.visible_subtopics();
        let computed = compute_child_layout(&self.rect, visible.len(), viewport, mode, options);
        self.children = resolve_child_positions(visible, &computed)
            .iter()
            .map(|p| p.resolve(&self.rect))
            .collect();
    }

    pub fn child_rect(&self, index: usize) -> Option<Rect> {
        self.children
            .get(index)
            .map(|c| Rect::centered_at(*c, self.child_size, self.child_size))
    }

    fn hit(&self, p: Point) -> bool {
        self.rect.center().distance(p) <= self.rect.width / 2.0
    }
}

impl Placeable for TileGeometry {
    fn set_origin(&mut self, origin: Point) {
        self.rect.x = origin.x;
        self.rect.y = origin.y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Tile(usize),
    Child(usize),
    Empty,
}

pub struct State {
    pub deck: Deck,
    pub viewport: Size,
    pub layout: MenuLayout,
    pub tiles: Vec<TileGeometry>,
    pub highlight: Option<usize>,
    pub marks: Vec<FocusMark>,
    pub mindmap: MindmapClass,
    pub focused: Option<TopicId>,
    pub detail_visible: bool,
    pub selected_child: Option<usize>,
    /// Subtopics marked by the user, as (topic, visible child index). Kept for
    /// the session only.
    pub bookmarks: BTreeSet<(TopicId, usize)>,
    pub transform: CameraTransform,
    child_mode: LayoutMode,
    child_options: ChildLayoutOptions,
}

impl State {
    pub fn new(deck: Deck, viewport: Size, config: &LayoutConfig) -> Self {
        let mut state = Self {
            layout: MenuLayout::compute(viewport, deck.len()),
            deck,
            viewport,
            tiles: Vec::new(),
            highlight: None,
            marks: Vec::new(),
            mindmap: MindmapClass::Idle,
            focused: None,
            detail_visible: false,
            selected_child: None,
            bookmarks: BTreeSet::new(),
            transform: CameraTransform::IDENTITY,
            child_mode: config.child_mode,
            child_options: config.child_options(),
        };
        state.relayout(viewport);
        state
    }

    /// Swaps in a new deck, e.g. after a config reload. Focus marks are reset.
    pub fn set_deck(&mut self, deck: Deck, config: &LayoutConfig) {
        self.deck = deck;
        self.child_mode = config.child_mode;
        self.child_options = config.child_options();
        self.highlight = self.highlight.filter(|&i| i < self.deck.len());
        self.selected_child = None;
        self.relayout(self.viewport);

        let before = self.bookmarks.len();
        let tiles = &self.tiles;
        self.bookmarks.retain(|(id, i)| {
            tiles.iter().any(|t| t.id == *id && *i < t.children.len())
        });
        log::debug!("Restored {} of {} bookmarks", self.bookmarks.len(), before);
    }

    /// Recomputes the ring for `viewport` and centers it in the window.
    pub fn relayout(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.layout = MenuLayout::compute(viewport, self.deck.len());

        let mut tiles: Vec<TileGeometry> = self
            .deck
            .topics
            .iter()
            .map(|t| TileGeometry::new(t.id, self.layout.tile_size))
            .collect();
        update_tile_positions(&self.layout, &mut tiles);

        let origin = self.layout.screen_origin();
        for ((tile, topic), pos) in tiles
            .iter_mut()
            .zip(&self.deck.topics)
            .zip(&self.layout.tile_positions)
        {
            tile.rect.x += origin.x;
            tile.rect.y += origin.y;
            tile.angle = pos.angle;
            tile.place_children(topic, viewport, self.child_mode, &self.child_options);
        }
        self.tiles = tiles;
        self.marks.resize(self.tiles.len(), FocusMark::None);
        self.refresh_marks();

        log::debug!("Layout {} with {} tiles", self.layout.describe(), self.tiles.len());
    }

    pub fn ring_center(&self) -> Point {
        self.viewport.center()
    }

    pub fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.viewport)
    }

    pub fn tile_index(&self, id: TopicId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == id)
    }

    pub fn tile(&self, id: TopicId) -> Option<&TileGeometry> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn focused_tile(&self) -> Option<&TileGeometry> {
        self.focused.and_then(|id| self.tile(id))
    }

    pub fn highlighted_tile(&self) -> Option<&TileGeometry> {
        self.highlight.and_then(|i| self.tiles.get(i))
    }

    /// `screen` is a window position; the current camera transform is undone
    /// before testing. Children of the focused tile take precedence.
    pub fn hit_test(&self, screen: Point) -> Hit {
        let p = self.transform.unproject(screen, self.ring_center());

        if let Some(tile) = self.focused_tile()
            && let Some(i) = (0..tile.children.len())
                .find(|&i| tile.child_rect(i).is_some_and(|r| r.center().distance(p) <= r.width / 2.0))
        {
            return Hit::Child(i);
        }

        self.tiles
            .iter()
            .position(|t| t.hit(p))
            .map_or(Hit::Empty, Hit::Tile)
    }

    /// Moves the highlight by `delta` slots around the ring, wrapping.
    pub fn move_highlight(&mut self, delta: isize) {
        let n = self.tiles.len();
        if n == 0 {
            self.highlight = None;
            return;
        }
        let next = match self.highlight {
            Some(i) => (i as isize + delta).rem_euclid(n as isize) as usize,
            None if delta < 0 => n - 1,
            None => 0,
        };
        self.highlight = Some(next);
    }

    pub fn apply_camera_state(&mut self, state: CameraState, focused: Option<TopicId>) {
        match state {
            CameraState::Idle => {
                self.focused = None;
                self.selected_child = None;
                self.mindmap = MindmapClass::Idle;
            }
            CameraState::Focusing | CameraState::Focused => {
                self.focused = focused;
                self.mindmap = MindmapClass::Focused;
            }
            // marks stay until the camera is back
            CameraState::Returning => {}
        }
        self.refresh_marks();
    }

    pub fn apply_animation_event(&mut self, event: AnimationEvent) {
        match (event.kind, event.phase) {
            (AnimationKind::ZoomIn, AnimationPhase::Start) => self.detail_visible = true,
            (AnimationKind::ZoomOut, AnimationPhase::End) => self.detail_visible = false,
            _ => {}
        }
    }

    pub fn select_child(&mut self, index: usize) {
        let count = self.focused_tile().map_or(0, |t| t.children.len());
        self.selected_child = (index < count).then_some(index);
    }

    /// Flips the bookmark on a child of the focused tile. Returns the new
    /// state, or `None` when no such child is shown.
    pub fn toggle_bookmark(&mut self, index: usize) -> Option<bool> {
        let tile = self.focused_tile()?;
        if index >= tile.children.len() {
            return None;
        }
        let key = (tile.id, index);

        let added = self.bookmarks.insert(key);
        if !added {
            self.bookmarks.remove(&key);
        }
        log::info!(
            "Bookmark {}: topic {}, child {}",
            if added { "added" } else { "removed" },
            key.0,
            index
        );
        Some(added)
    }

    pub fn is_bookmarked(&self, id: TopicId, index: usize) -> bool {
        self.bookmarks.contains(&(id, index))
    }

    pub fn selected_child_title(&self) -> Option<&str> {
        let topic = self.deck.get(self.focused?)?;
        let child = topic.visible_subtopics().get(self.selected_child?)?;
        Some(child.title.as_str())
    }

    fn refresh_marks(&mut self) {
        let focused = self.focused;
        for (mark, tile) in self.marks.iter_mut().zip(&self.tiles) {
            *mark = match focused {
                None => FocusMark::None,
                Some(id) if id == tile.id => FocusMark::Focused,
                Some(_) => FocusMark::Dimmed,
            };
        }
    }
}
