pub mod app;
pub mod settings_screen;
pub mod timer_screen;


pub use app::*;
