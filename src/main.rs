mod components;
mod config;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).expect("Error initializing logger");
    log::info!("gesture lock started");
    yew::Renderer::<App>::new().render();
}
