mod components;
mod config;
mod error;
mod hierarchy;
mod layout;
mod loader;
mod model;
mod palette;
mod render;
mod state;
mod util;

fn main() {
    util::init_logging();
    yew::Renderer::<components::App>::new().render();
}
