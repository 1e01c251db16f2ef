pub mod app;
pub mod core;
pub mod extract;
pub mod history;
pub mod model;
pub mod notify;
pub mod platform;
