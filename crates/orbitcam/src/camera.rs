//! Pan/zoom camera that brings a tile to the middle of the viewport.
//!
//! `Idle -> Focusing -> Focused -> Returning -> Idle`. The controller owns the
//! camera transform; callers drive animations by calling [`CameraController::tick`]
//! from their frame clock and read the result through [`CameraController::transform`]
//! or an [`CameraController::on_render`] callback.

use crate::content::TopicId;
use crate::geometry::{Point, Rect, clamp, lerp};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use strum::Display as StrumDisplay;
use thiserror::Error;

pub const ZOOM_IN_DURATION: Duration = Duration::from_millis(800);
pub const ZOOM_OUT_DURATION: Duration = Duration::from_millis(500);
pub const FOCUS_SCALE_BIAS: f64 = 0.65;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 2.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CameraState {
    #[default]
    Idle,
    Focusing,
    Focused,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnimationEvent {
    pub kind: AnimationKind,
    pub phase: AnimationPhase,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("cannot {action} while the camera is {state}")]
    InvalidTransition {
        action: &'static str,
        state: CameraState,
    },
    #[error("a camera animation is already in progress")]
    AnimationInProgress,
}

/// Scale plus translation. The translation is stored divided by `scale`, the
/// way it is applied ahead of the scale step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            scale: lerp(self.scale, to.scale, t),
            tx: lerp(self.tx, to.tx, t),
            ty: lerp(self.ty, to.ty, t),
        }
    }

    /// Maps a point of the unzoomed scene to the screen, scaling about `origin`
    /// (the viewport center).
    pub fn project(&self, p: Point, origin: Point) -> Point {
        let s = self.scale;
        Point::new(
            origin.x + s * (p.x - origin.x + s * self.tx),
            origin.y + s * (p.y - origin.y + s * self.ty),
        )
    }

    pub fn unproject(&self, p: Point, origin: Point) -> Point {
        let s = self.scale;
        Point::new(
            (p.x - origin.x) / s - s * self.tx + origin.x,
            (p.y - origin.y) / s - s * self.ty + origin.y,
        )
    }
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "zoom_in_ms")]
    pub zoom_in: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "zoom_out_ms")]
    pub zoom_out: Duration,
    /// Share of the viewport a focused tile should cover.
    pub focus_scale_bias: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Sampled once when the controller is built.
    pub reduced_motion: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom_in: ZOOM_IN_DURATION,
            zoom_out: ZOOM_OUT_DURATION,
            focus_scale_bias: FOCUS_SCALE_BIAS,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            reduced_motion: false,
        }
    }
}

/// Keyboard slide navigation of whatever presents the deck. Locked while a
/// tile is focused.
pub trait KeyboardNavigation {
    fn set_keyboard_enabled(&mut self, enabled: bool);
}

pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

/// Transform that centers `tile` in `viewport`. Both rects share a coordinate
/// space; zero-sized tiles are treated as 1px.
pub fn compute_camera_target(
    tile: Rect,
    viewport: Rect,
    settings: &CameraSettings,
) -> CameraTransform {
    let bias = settings.focus_scale_bias;

    let tile_center = Point::new(
        tile.x - viewport.x + tile.width / 2.0,
        tile.y - viewport.y + tile.height / 2.0,
    );
    let tile_width = if tile.width > 0.0 { tile.width } else { 1.0 };
    let tile_height = if tile.height > 0.0 { tile.height } else { 1.0 };

    let desired = (viewport.width / (tile_width * bias)).min(viewport.height / (tile_height * bias));
    let scale = clamp(desired, settings.min_zoom, settings.max_zoom);

    CameraTransform {
        scale,
        tx: (viewport.width / 2.0 - tile_center.x) / scale,
        ty: (viewport.height / 2.0 - tile_center.y) / scale,
    }
}

type StateListener = Box<dyn FnMut(CameraState, Option<TopicId>)>;
type AnimationListener = Box<dyn FnMut(AnimationEvent)>;
type RenderListener = Box<dyn FnMut(CameraTransform)>;

#[derive(Debug, Clone, Copy)]
struct Animation {
    kind: AnimationKind,
    from: CameraTransform,
    to: CameraTransform,
    duration: Duration,
    started_at: Option<Duration>,
}

pub struct CameraController {
    settings: CameraSettings,
    state: CameraState,
    focused_tile_id: Option<TopicId>,
    focused_tile_rect: Option<Rect>,
    transform: CameraTransform,
    animation: Option<Animation>,
    navigation: Box<dyn KeyboardNavigation>,
    state_listeners: Vec<StateListener>,
    animation_listeners: Vec<AnimationListener>,
    render_listeners: Vec<RenderListener>,
}

impl CameraController {
    pub fn new(settings: CameraSettings, navigation: Box<dyn KeyboardNavigation>) -> Self {
        log::debug!(
            "Camera ready (reduced motion: {}, zoom {}..{})",
            settings.reduced_motion,
            settings.min_zoom,
            settings.max_zoom
        );
        Self {
            settings,
            state: CameraState::Idle,
            focused_tile_id: None,
            focused_tile_rect: None,
            transform: CameraTransform::IDENTITY,
            animation: None,
            navigation,
            state_listeners: Vec::new(),
            animation_listeners: Vec::new(),
            render_listeners: Vec::new(),
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn focused_tile_id(&self) -> Option<TopicId> {
        self.focused_tile_id
    }

    pub fn focused_tile_rect(&self) -> Option<Rect> {
        self.focused_tile_rect
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn transform(&self) -> CameraTransform {
        self.transform
    }

    pub fn on_state_change(&mut self, listener: impl FnMut(CameraState, Option<TopicId>) + 'static) {
        self.state_listeners.push(Box::new(listener));
    }

    pub fn on_animation_event(&mut self, listener: impl FnMut(AnimationEvent) + 'static) {
        self.animation_listeners.push(Box::new(listener));
    }

    pub fn on_render(&mut self, listener: impl FnMut(CameraTransform) + 'static) {
        self.render_listeners.push(Box::new(listener));
    }

    /// Zooms onto `tile`. Only accepted from `Idle` with no animation running;
    /// otherwise nothing changes.
    pub fn focus_tile(&mut self, id: TopicId, tile: Rect, viewport: Rect) -> Result<(), CameraError> {
        if self.animation.is_some() {
            log::warn!("Cannot focus tile {id}: animation already in progress");
            return Err(CameraError::AnimationInProgress);
        }
        if self.state != CameraState::Idle {
            log::warn!("Cannot focus tile {id}: camera is {}", self.state);
            return Err(CameraError::InvalidTransition {
                action: "focus",
                state: self.state,
            });
        }

        log::debug!("Focusing tile {id}");
        self.focused_tile_id = Some(id);
        self.focused_tile_rect = Some(tile);
        self.state = CameraState::Focusing;
        self.navigation.set_keyboard_enabled(false);

        self.notify_state();
        self.notify_animation(AnimationKind::ZoomIn, AnimationPhase::Start);

        let target = compute_camera_target(tile, viewport, &self.settings);
        self.transition_to(AnimationKind::ZoomIn, target, self.settings.zoom_in);
        Ok(())
    }

    /// Returns to the identity transform. Only accepted from `Focused`.
    pub fn unfocus(&mut self) -> Result<(), CameraError> {
        if self.state != CameraState::Focused {
            log::warn!("Cannot unfocus: camera is {}", self.state);
            return Err(CameraError::InvalidTransition {
                action: "unfocus",
                state: self.state,
            });
        }

        log::debug!("Unfocusing tile {:?}", self.focused_tile_id);
        self.state = CameraState::Returning;
        self.notify_state();
        self.notify_animation(AnimationKind::ZoomOut, AnimationPhase::Start);

        self.transition_to(
            AnimationKind::ZoomOut,
            CameraTransform::IDENTITY,
            self.settings.zoom_out,
        );
        Ok(())
    }

    /// Advances the running animation to `now` (any monotonic clock). The first
    /// tick after a transition starts pins the animation's start time. Returns
    /// whether another frame is needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };

        let started_at = *anim.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        let progress = if anim.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / anim.duration.as_secs_f64()).min(1.0)
        };

        let Animation { kind, from, to, .. } = *anim;
        if progress < 1.0 {
            self.apply_transform(from.lerp(&to, ease_out_expo(progress)));
            true
        } else {
            self.animation = None;
            self.apply_transform(to);
            self.complete(kind);
            false
        }
    }

    /// Cuts the running animation short: the transform jumps to its target and
    /// the transition completes as if the animation had run out. Returns false
    /// when nothing was running.
    pub fn cancel_animation(&mut self) -> bool {
        let Some(anim) = self.animation.take() else {
            return false;
        };
        log::debug!("Cancelled {} animation", anim.kind);
        self.apply_transform(anim.to);
        self.complete(anim.kind);
        true
    }

    fn transition_to(&mut self, kind: AnimationKind, target: CameraTransform, duration: Duration) {
        if self.settings.reduced_motion {
            self.apply_transform(target);
            self.complete(kind);
            return;
        }
        self.animation = Some(Animation {
            kind,
            from: self.transform,
            to: target,
            duration,
            started_at: None,
        });
    }

    fn complete(&mut self, kind: AnimationKind) {
        match kind {
            AnimationKind::ZoomIn => self.finish_focus(),
            AnimationKind::ZoomOut => self.finish_unfocus(),
        }
    }

    fn finish_focus(&mut self) {
        log::debug!("Focus complete");
        self.state = CameraState::Focused;
        self.notify_state();
        self.notify_animation(AnimationKind::ZoomIn, AnimationPhase::End);
    }

    fn finish_unfocus(&mut self) {
        log::debug!("Unfocus complete");
        self.state = CameraState::Idle;
        self.focused_tile_id = None;
        self.focused_tile_rect = None;
        self.notify_state();
        self.notify_animation(AnimationKind::ZoomOut, AnimationPhase::End);
        self.navigation.set_keyboard_enabled(true);
    }

    fn apply_transform(&mut self, transform: CameraTransform) {
        self.transform = transform;
        for (i, listener) in self.render_listeners.iter_mut().enumerate() {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(transform))).is_err() {
                log::error!("Render listener {i} panicked");
            }
        }
    }

    fn notify_state(&mut self) {
        let (state, focused) = (self.state, self.focused_tile_id);
        for (i, listener) in self.state_listeners.iter_mut().enumerate() {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(state, focused))).is_err() {
                log::error!("State listener {i} panicked on '{state}'");
            }
        }
    }

    fn notify_animation(&mut self, kind: AnimationKind, phase: AnimationPhase) {
        let event = AnimationEvent { kind, phase };
        for (i, listener) in self.animation_listeners.iter_mut().enumerate() {
            if panic::catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                log::error!("Animation listener {i} panicked on {kind} {phase}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f64 = 1e-9;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    fn off_center_tile() -> Rect {
        Rect::centered_at(Point::new(1400.0, 300.0), 150.0, 150.0)
    }

    #[derive(Clone, Default)]
    struct RecordingNav(Rc<RefCell<Vec<bool>>>);

    impl KeyboardNavigation for RecordingNav {
        fn set_keyboard_enabled(&mut self, enabled: bool) {
            self.0.borrow_mut().push(enabled);
        }
    }

    fn controller(reduced_motion: bool) -> (CameraController, RecordingNav) {
        let nav = RecordingNav::default();
        let settings = CameraSettings {
            reduced_motion,
            ..CameraSettings::default()
        };
        (CameraController::new(settings, Box::new(nav.clone())), nav)
    }

    #[test]
    fn test_centered_tile_target() {
        let tile = Rect::centered_at(Point::new(960.0, 540.0), 150.0, 150.0);
        let target = compute_camera_target(tile, viewport(), &CameraSettings::default());
        // uncapped value is ~11.08
        assert_eq!(target.scale, MAX_ZOOM);
        assert_eq!(target.tx, 0.0);
        assert_eq!(target.ty, 0.0);
    }

    #[test]
    fn test_large_tile_clamps_to_min_zoom() {
        // wider than the viewport once the bias is applied
        let tile = Rect::new(-600.0, -400.0, 3000.0, 1800.0);
        let target = compute_camera_target(tile, viewport(), &CameraSettings::default());
        assert_eq!(target.scale, MIN_ZOOM);
        assert!((target.tx - 60.0).abs() < EPS);
        assert!((target.ty - 40.0).abs() < EPS);
    }

    #[test]
    fn test_target_is_bit_identical() {
        let settings = CameraSettings::default();
        let a = compute_camera_target(off_center_tile(), viewport(), &settings);
        let b = compute_camera_target(off_center_tile(), viewport(), &settings);
        assert_eq!(a.scale.to_bits(), b.scale.to_bits());
        assert_eq!(a.tx.to_bits(), b.tx.to_bits());
        assert_eq!(a.ty.to_bits(), b.ty.to_bits());
    }

    #[test]
    fn test_target_centers_tile_on_screen() {
        let vp = viewport();
        let target = compute_camera_target(off_center_tile(), vp, &CameraSettings::default());
        let origin = vp.center();
        let on_screen = target.project(off_center_tile().center(), origin);
        assert!((on_screen.x - origin.x).abs() < 1e-6);
        assert!((on_screen.y - origin.y).abs() < 1e-6);

        let back = target.unproject(on_screen, origin);
        assert!(back.distance(off_center_tile().center()) < 1e-6);
    }

    #[test]
    fn test_viewport_offset_respected() {
        let vp = Rect::new(100.0, 50.0, 1920.0, 1080.0);
        let tile = Rect::centered_at(Point::new(1060.0, 590.0), 150.0, 150.0);
        let target = compute_camera_target(tile, vp, &CameraSettings::default());
        assert_eq!(target.tx, 0.0);
        assert_eq!(target.ty, 0.0);
    }

    #[test]
    fn test_ease_out_expo_endpoints() {
        assert_eq!(ease_out_expo(0.0), 0.0);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert!((ease_out_expo(0.5) - (1.0 - 2f64.powi(-5))).abs() < EPS);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let (mut cam, nav) = controller(false);

        assert_eq!(
            cam.unfocus(),
            Err(CameraError::InvalidTransition {
                action: "unfocus",
                state: CameraState::Idle
            })
        );
        assert_eq!(cam.state(), CameraState::Idle);
        assert!(!cam.is_animating());

        cam.focus_tile(TopicId::new(1), off_center_tile(), viewport())
            .unwrap();
        assert_eq!(cam.state(), CameraState::Focusing);
        assert!(cam.is_animating());

        assert_eq!(
            cam.focus_tile(TopicId::new(2), off_center_tile(), viewport()),
            Err(CameraError::AnimationInProgress)
        );
        assert!(cam.unfocus().is_err());
        assert_eq!(cam.state(), CameraState::Focusing);
        assert_eq!(cam.focused_tile_id(), Some(TopicId::new(1)));

        cam.tick(ms(0));
        cam.tick(ms(800));
        assert_eq!(cam.state(), CameraState::Focused);
        assert!(!cam.is_animating());

        assert_eq!(
            cam.focus_tile(TopicId::new(2), off_center_tile(), viewport()),
            Err(CameraError::InvalidTransition {
                action: "focus",
                state: CameraState::Focused
            })
        );
        assert_eq!(cam.state(), CameraState::Focused);
        assert!(!cam.is_animating());
        assert_eq!(*nav.0.borrow(), vec![false]);
    }

    #[test]
    fn test_returning_rejects_transitions() {
        let (mut cam, nav) = controller(false);
        cam.focus_tile(TopicId::new(1), off_center_tile(), viewport())
            .unwrap();
        cam.tick(ms(0));
        cam.tick(ms(800));
        cam.unfocus().unwrap();
        assert_eq!(cam.state(), CameraState::Returning);
        let before = cam.transform();

        assert_eq!(
            cam.focus_tile(TopicId::new(2), off_center_tile(), viewport()),
            Err(CameraError::AnimationInProgress)
        );
        assert_eq!(
            cam.unfocus(),
            Err(CameraError::InvalidTransition {
                action: "unfocus",
                state: CameraState::Returning
            })
        );

        assert_eq!(cam.state(), CameraState::Returning);
        assert_eq!(cam.transform(), before);
        assert_eq!(cam.focused_tile_id(), Some(TopicId::new(1)));
        assert!(cam.is_animating());
        assert_eq!(*nav.0.borrow(), vec![false]);
    }

    #[test]
    fn test_animated_round_trip() {
        let (mut cam, nav) = controller(false);
        let target = compute_camera_target(off_center_tile(), viewport(), cam.settings());

        cam.focus_tile(TopicId::new(3), off_center_tile(), viewport())
            .unwrap();
        assert!(cam.tick(ms(1000)));
        assert_eq!(cam.transform(), CameraTransform::IDENTITY);

        assert!(cam.tick(ms(1400)));
        let mid = cam.transform();
        let eased = 1.0 - 2f64.powi(-5);
        assert!((mid.scale - (1.0 + (target.scale - 1.0) * eased)).abs() < EPS);
        assert_eq!(cam.state(), CameraState::Focusing);

        assert!(!cam.tick(ms(1800)));
        assert_eq!(cam.transform(), target);
        assert_eq!(cam.state(), CameraState::Focused);

        cam.unfocus().unwrap();
        assert_eq!(cam.state(), CameraState::Returning);
        assert!(cam.tick(ms(5000)));
        assert!(cam.tick(ms(5250)));
        assert!(!cam.tick(ms(5500)));

        assert_eq!(cam.transform(), CameraTransform::IDENTITY);
        assert_eq!(cam.state(), CameraState::Idle);
        assert_eq!(cam.focused_tile_id(), None);
        assert_eq!(cam.focused_tile_rect(), None);
        assert_eq!(*nav.0.borrow(), vec![false, true]);
    }

    #[test]
    fn test_reduced_motion_is_synchronous() {
        let (mut cam, nav) = controller(true);
        let target = compute_camera_target(off_center_tile(), viewport(), cam.settings());

        cam.focus_tile(TopicId::new(4), off_center_tile(), viewport())
            .unwrap();
        assert_eq!(cam.state(), CameraState::Focused);
        assert!(!cam.is_animating());
        assert_eq!(cam.transform(), target);
        assert!(!cam.tick(ms(16)));

        cam.unfocus().unwrap();
        assert_eq!(cam.state(), CameraState::Idle);
        assert!(!cam.is_animating());
        assert_eq!(cam.transform(), CameraTransform::IDENTITY);
        assert_eq!(*nav.0.borrow(), vec![false, true]);
    }

    #[test]
    fn test_cancel_finishes_transition() {
        let (mut cam, _) = controller(false);
        assert!(!cam.cancel_animation());

        cam.focus_tile(TopicId::new(5), off_center_tile(), viewport())
            .unwrap();
        cam.tick(ms(0));
        assert!(cam.cancel_animation());
        assert_eq!(cam.state(), CameraState::Focused);
        assert!(!cam.is_animating());

        cam.unfocus().unwrap();
        assert!(cam.cancel_animation());
        assert_eq!(cam.state(), CameraState::Idle);
        assert_eq!(cam.transform(), CameraTransform::IDENTITY);
    }

    #[test]
    fn test_listener_order_and_payloads() {
        let (mut cam, _) = controller(true);
        let log = Rc::new(RefCell::new(Vec::new()));

        let states = log.clone();
        cam.on_state_change(move |state, id| {
            states
                .borrow_mut()
                .push(format!("state:{state}:{}", id.map(u32::from).unwrap_or(0)))
        });
        let anims = log.clone();
        cam.on_animation_event(move |e| anims.borrow_mut().push(format!("anim:{}:{}", e.kind, e.phase)));

        cam.focus_tile(TopicId::new(9), off_center_tile(), viewport())
            .unwrap();
        cam.unfocus().unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "state:focusing:9",
                "anim:zoom-in:start",
                "state:focused:9",
                "anim:zoom-in:end",
                "state:returning:9",
                "anim:zoom-out:start",
                "state:idle:0",
                "anim:zoom-out:end",
            ]
        );
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let (mut cam, _) = controller(true);
        let seen = Rc::new(RefCell::new(Vec::new()));

        cam.on_state_change(|_, _| panic!("listener failure"));
        let sink = seen.clone();
        cam.on_state_change(move |state, _| sink.borrow_mut().push(state));

        cam.focus_tile(TopicId::new(1), off_center_tile(), viewport())
            .unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![CameraState::Focusing, CameraState::Focused]
        );
    }

    #[test]
    fn test_render_callback_sees_every_frame() {
        let (mut cam, _) = controller(false);
        let frames = Rc::new(RefCell::new(0usize));
        let counter = frames.clone();
        cam.on_render(move |_| *counter.borrow_mut() += 1);

        cam.focus_tile(TopicId::new(1), off_center_tile(), viewport())
            .unwrap();
        cam.tick(ms(0));
        cam.tick(ms(16));
        cam.tick(ms(2000));
        assert_eq!(*frames.borrow(), 3);
    }

    #[test]
    fn test_settings_deserialize_millis() {
        let settings: CameraSettings =
            serde_json::from_str(r#"{"zoom_in_ms": 300, "reduced_motion": true}"#).unwrap();
        assert_eq!(settings.zoom_in, ms(300));
        assert_eq!(settings.zoom_out, ZOOM_OUT_DURATION);
        assert!(settings.reduced_motion);
        assert_eq!(settings.max_zoom, MAX_ZOOM);
    }
}
