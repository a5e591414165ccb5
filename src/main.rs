mod api;
mod app;
mod charts;
mod components;
mod config;
mod error;
mod format;
mod hooks;
mod model;
mod pages;
mod routes;
mod state;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting finance tracker");
    yew::Renderer::<app::App>::new().render();
}
