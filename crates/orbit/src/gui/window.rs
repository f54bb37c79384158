use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};
use orbitcam::geometry::Size;

/// Full-screen overlay. Compositors without layer shell get a plain
/// fullscreen window instead.
pub fn init_overlay(window: &gtk::ApplicationWindow) {
    if !gtk4_layer_shell::is_supported() {
        log::info!("Layer shell unavailable, using a fullscreen window");
        window.fullscreen();
        return;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("orbit"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
}

/// Size of the monitor the window is on, before the first allocation.
pub fn monitor_size(window: &gtk::ApplicationWindow) -> Option<Size> {
    let display = gdk::Display::default()?;
    let monitor = window
        .surface()
        .and_then(|s| display.monitor_at_surface(&s))
        .or_else(|| {
            display
                .monitors()
                .item(0)
                .and_then(|item| item.downcast::<gdk::Monitor>().ok())
        })?;
    let geometry = monitor.geometry();
    Some(Size::new(geometry.width() as f64, geometry.height() as f64))
}
