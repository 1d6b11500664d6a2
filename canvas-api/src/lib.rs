pub mod assignment;
pub mod client;
pub mod config;
pub mod course;
pub mod services;

mod util;
