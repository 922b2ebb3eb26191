use navmotion::config;
use navmotion::scene::Scene;
use orbitbar::gui::app::AppModel;
use orbitbar::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let scene = Scene::from_config(&config).unwrap_or_else(|e| {
        log::warn!("Falling back to the default scene: {}", e);
        Scene::default()
    });

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.orbitbar.demo");

    app.run::<AppModel>((scene, rx));
}
