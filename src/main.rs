#![allow(warnings)]
//! Retail Console Frontend Entry Point

mod api;
mod app;
mod billing;
mod cart;
mod components;
mod config;
mod context;
mod error;
mod export;
mod inventory_cache;
mod listing;
mod logging;
mod models;
mod pages;
mod reports;
mod session;
mod storage;
mod store;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::AppConfig::from_env().log_level);
    mount_to_body(App);
}
