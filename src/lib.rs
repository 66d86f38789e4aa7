pub mod catalog;
pub mod environment;
pub mod logging;
pub mod view;

pub const TARGET_WEB_REQUEST: &str = "web_request";
