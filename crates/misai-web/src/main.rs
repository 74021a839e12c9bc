//! MISAI browser client

mod app;
mod components;
mod pages;
mod preview;
mod submit;

use leptos::*;
use misai_core::backend::DEFAULT_HOST_URL;
use misai_core::{ClientConfig, HttpBackend};

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let config = ClientConfig::new(option_env!("MISAI_HOST_URL").unwrap_or(DEFAULT_HOST_URL));
    tracing::info!("Using verification service at {}", config.base_url);

    mount_to_body(move || {
        provide_context(HttpBackend::new(config));
        view! {
            <app::App/>
        }
    });
}
