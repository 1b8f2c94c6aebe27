use anyhow::Context;
use orbital::{OrbitEngine, config};
use orbital_gtk::gui::app::AppModel;
use orbital_gtk::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // first run: leave an editable copy of the defaults behind
    config::write_default_config().context("Failed to set up the config file")?;
    let config = config::load_or_default();
    let engine = OrbitEngine::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx).context("Failed to start background services")?;

    let app = RelmApp::new("org.orbital.orbital");

    app.run::<AppModel>((engine, rx));
    Ok(())
}
