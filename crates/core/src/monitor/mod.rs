pub mod infrastructure;
pub mod presence_monitor;
pub mod session_controller;
pub mod session_error;
pub mod session_logger;
pub mod tick_driver;
