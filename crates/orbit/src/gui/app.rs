use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, Hit, NavigationLock, State};
use crate::gui::theme::{self, LayoutStyle, ThemeColors};
use crate::gui::window;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbitcam::camera::{CameraController, CameraSettings, CameraState};
use orbitcam::content::TopicId;
use orbitcam::geometry::{Point, Size};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub camera: Rc<RefCell<CameraController>>,
    pub navigation: NavigationLock,
    pub config: Config,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    layout_style: LayoutStyle,
    ticking: Rc<Cell<bool>>,
    pending_resize: Rc<RefCell<Option<glib::SourceId>>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Focus(TopicId),
    Unfocus,
    ConfigReload,
    Click(Point),
    Bookmark(Point),
    Key(gdk::Key),
    Resized(Size),
    ApplyResize(Size),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Focus(id) => AppMsg::Focus(id),
            AppEvent::Unfocus => AppMsg::Unfocus,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Builds a camera whose listeners write straight into the menu state.
fn build_camera(
    settings: CameraSettings,
    navigation: &NavigationLock,
    state: &Rc<RefCell<State>>,
    drawing_area: &gtk::DrawingArea,
) -> CameraController {
    let mut camera = CameraController::new(settings, Box::new(navigation.clone()));

    let marks = state.clone();
    let area = drawing_area.clone();
    camera.on_state_change(move |camera_state, focused| {
        log::debug!("Camera {} ({:?})", camera_state, focused);
        let mut state = marks.borrow_mut();
        state.apply_camera_state(camera_state, focused);
        area.set_css_classes(&["orbit-drawing-area", state.mindmap.as_ref()]);
        area.queue_draw();
    });

    let detail = state.clone();
    camera.on_animation_event(move |event| detail.borrow_mut().apply_animation_event(event));

    let frames = state.clone();
    let area = drawing_area.clone();
    camera.on_render(move |transform| {
        frames.borrow_mut().transform = transform;
        area.queue_draw();
    });

    camera
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Orbit"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "orbit-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gdk::Key::Escape
                        | gdk::Key::Left
                        | gdk::Key::Right
                        | gdk::Key::Up
                        | gdk::Key::Down
                        | gdk::Key::Return
                        | gdk::Key::KP_Enter
                        | gdk::Key::space => {
                            sender.input(AppMsg::Key(key));
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "orbit-drawing-area",
                add_css_class: "idle",

                connect_resize[sender] => move |_, w, h| {
                    sender.input(AppMsg::Resized(Size::new(w as f64, h as f64)));
                },

                add_controller = gtk::GestureClick {
                    set_button: 0,
                    connect_released[sender] => move |gesture, _, x, y| {
                        let point = Point::new(x, y);
                        match gesture.current_button() {
                            gdk::BUTTON_PRIMARY => sender.input(AppMsg::Click(point)),
                            gdk::BUTTON_SECONDARY => sender.input(AppMsg::Bookmark(point)),
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_overlay(&root);

        let viewport = window::monitor_size(&root).unwrap_or(Size::new(1920.0, 1080.0));
        let state = Rc::new(RefCell::new(State::new(
            config.deck(),
            viewport,
            &config.layout,
        )));
        let navigation = NavigationLock::default();
        let drawing_area = gtk::DrawingArea::default();
        let camera = build_camera(config.camera, &navigation, &state, &drawing_area);

        let model = AppModel {
            state,
            camera: Rc::new(RefCell::new(camera)),
            navigation,
            config,
            visible: false,
            root: root.clone(),
            drawing_area: drawing_area.clone(),
            layout_style: LayoutStyle::install(),
            ticking: Rc::new(Cell::new(false)),
            pending_resize: Rc::new(RefCell::new(None)),
        };
        model.layout_style.update(&model.state.borrow().layout);

        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

        let state_draw = model.state.clone();
        model
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = menu::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                if let Some(size) = window::monitor_size(&self.root) {
                    self.relayout(size);
                }
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.snap_back();
                self.visible = false;
            }
            AppMsg::Focus(id) => {
                if self.visible {
                    self.focus(id);
                }
            }
            AppMsg::Unfocus => self.unfocus(),
            AppMsg::Click(point) => {
                if self.visible {
                    self.click(point);
                }
            }
            AppMsg::Bookmark(point) => {
                if self.visible {
                    self.bookmark(point);
                }
            }
            AppMsg::Key(key) => self.key(key),
            AppMsg::Resized(size) => self.debounce_resize(size, sender),
            AppMsg::ApplyResize(size) => {
                self.snap_back();
                self.relayout(size);
            }
            AppMsg::ConfigReload => self.reload(),
        }
    }
}

impl AppModel {
    fn focus(&mut self, id: TopicId) {
        let target = {
            let state = self.state.borrow();
            state
                .tile(id)
                .map(|tile| (tile.rect, state.viewport_rect()))
        };
        let Some((rect, viewport)) = target else {
            log::warn!("No tile with id {}", id);
            return;
        };

        if self.camera.borrow_mut().focus_tile(id, rect, viewport).is_ok() {
            self.start_ticking();
        }
    }

    fn unfocus(&mut self) {
        if self.camera.borrow_mut().unfocus().is_ok() {
            self.start_ticking();
        }
    }

    /// Jumps straight back to the overview, whatever the camera is doing.
    fn snap_back(&mut self) {
        let mut camera = self.camera.borrow_mut();
        camera.cancel_animation();
        if camera.state() == CameraState::Focused && camera.unfocus().is_ok() {
            camera.cancel_animation();
        }
    }

    fn click(&mut self, point: Point) {
        let camera_state = self.camera.borrow().state();
        let hit = self.state.borrow().hit_test(point);

        match (camera_state, hit) {
            (CameraState::Idle, Hit::Tile(i)) => {
                let id = self.state.borrow().tiles.get(i).map(|t| t.id);
                if let Some(id) = id {
                    self.state.borrow_mut().highlight = Some(i);
                    self.focus(id);
                }
            }
            (CameraState::Focused, Hit::Child(i)) => {
                self.state.borrow_mut().select_child(i);
                self.drawing_area.queue_draw();
            }
            (CameraState::Focused, Hit::Tile(i))
                if self.state.borrow().focused_tile().map(|t| t.id)
                    == self.state.borrow().tiles.get(i).map(|t| t.id) => {}
            (CameraState::Focused, _) => self.unfocus(),
            _ => {}
        }
    }

    /// Right click on a child of the focused tile.
    fn bookmark(&mut self, point: Point) {
        if self.camera.borrow().state() != CameraState::Focused {
            return;
        }
        let mut state = self.state.borrow_mut();
        if let Hit::Child(i) = state.hit_test(point)
            && state.toggle_bookmark(i).is_some()
        {
            self.drawing_area.queue_draw();
        }
    }

    fn key(&mut self, key: gdk::Key) {
        match key {
            gdk::Key::Escape => {
                let camera_state = self.camera.borrow().state();
                match camera_state {
                    CameraState::Idle => self.visible = false,
                    CameraState::Focused => self.unfocus(),
                    CameraState::Focusing => {
                        self.camera.borrow_mut().cancel_animation();
                        self.unfocus();
                    }
                    CameraState::Returning => {
                        self.camera.borrow_mut().cancel_animation();
                    }
                }
            }
            gdk::Key::Left | gdk::Key::Up if self.navigation.enabled() => {
                self.state.borrow_mut().move_highlight(-1);
                self.drawing_area.queue_draw();
            }
            gdk::Key::Right | gdk::Key::Down if self.navigation.enabled() => {
                self.state.borrow_mut().move_highlight(1);
                self.drawing_area.queue_draw();
            }
            gdk::Key::Return | gdk::Key::KP_Enter | gdk::Key::space => {
                let id = self.state.borrow().highlighted_tile().map(|t| t.id);
                if let Some(id) = id {
                    self.focus(id);
                }
            }
            _ => {}
        }
    }

    fn start_ticking(&self) {
        if !self.camera.borrow().is_animating() || self.ticking.replace(true) {
            return;
        }

        let camera = self.camera.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |_, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            if camera.borrow_mut().tick(now) {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn debounce_resize(&mut self, size: Size, sender: ComponentSender<Self>) {
        if let Some(source) = self.pending_resize.borrow_mut().take() {
            source.remove();
        }

        let pending = self.pending_resize.clone();
        let source = glib::timeout_add_local_once(self.config.layout.resize_debounce, move || {
            pending.borrow_mut().take();
            sender.input(AppMsg::ApplyResize(size));
        });
        *self.pending_resize.borrow_mut() = Some(source);
    }

    fn relayout(&mut self, size: Size) {
        if !(size.width > 0.0 && size.height > 0.0) || size == self.state.borrow().viewport {
            return;
        }
        self.state.borrow_mut().relayout(size);
        self.layout_style.update(&self.state.borrow().layout);
        self.drawing_area.queue_draw();
    }

    fn reload(&mut self) {
        match config::load_config() {
            Ok(new_config) => {
                self.snap_back();
                self.state
                    .borrow_mut()
                    .set_deck(new_config.deck(), &new_config.layout);

                if new_config.camera != self.config.camera {
                    *self.camera.borrow_mut() = build_camera(
                        new_config.camera,
                        &self.navigation,
                        &self.state,
                        &self.drawing_area,
                    );
                }
                self.config = new_config;
                self.layout_style.update(&self.state.borrow().layout);
                self.drawing_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}
