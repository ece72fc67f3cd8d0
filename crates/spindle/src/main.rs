use relm4::prelude::*;
use spindle::config;
use spindle::gui::app::AppModel;
use spindle::gui::carousel::Stage;
use spindle::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let stage = match Stage::new(config.items(), &config) {
        Ok(stage) => stage,
        Err(e) => {
            log::error!("Cannot build carousel: {}", e);
            return;
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.spindle.Spindle");

    app.run::<AppModel>((stage, config.arrow_size, rx));
}
