pub mod config;
pub mod logging;

pub mod auth;
pub mod batch_file;
pub mod budget;
pub mod console;
pub mod dispatch;
pub mod fetch;
pub mod input;
pub mod naming;
pub mod reencode;
pub mod setup;
pub mod tools;
