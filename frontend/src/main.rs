use crate::app::App;

mod api;
mod app;
mod components;
mod config;
mod logging;
mod workflow;

fn main() {
    logging::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
