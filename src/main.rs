//! SchoolPay Frontend Entry Point

mod app;
mod cart;
mod checkout;
mod commands;
mod components;
mod error;
mod logging;
mod models;
mod paging;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
