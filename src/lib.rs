pub mod clustering;
pub mod environment;
pub mod logging;
pub mod web;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_ENGINE: &str = "engine";
