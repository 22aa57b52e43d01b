pub mod config;
pub mod logging;

pub mod downloader;
pub mod flow;
pub mod notify;
pub mod probe;
pub mod screen;
pub mod share;
pub mod url_check;
pub mod url_model;
