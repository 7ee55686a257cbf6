pub mod aggregate;
pub mod conf;
pub mod dashboard;
pub mod event;
pub mod generator;
pub mod logging;
pub mod monitor;
pub mod source;
