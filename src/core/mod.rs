pub mod config;
pub mod countdown;
pub mod picker;
pub mod schedule;
pub mod settings;

#[cfg(test)]
mod config_test;

pub use config::*;
pub use countdown::*;
pub use picker::*;
pub use schedule::*;
pub use settings::*;
