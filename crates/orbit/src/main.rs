use orbit::config;
use orbit::gui::app::AppModel;
use orbit::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.orbit.menu");

    app.run::<AppModel>((config, rx));
}
