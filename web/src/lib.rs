use gloo::utils::document;
use wasm_bindgen::prelude::*;

mod app;

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("Error initializing logger");
    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");
    log::info!("Application started");
    yew::Renderer::<app::App>::with_root(root).render();
}
