pub mod activity_log;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod model;
pub mod monitor;
pub mod projection;
pub mod remote;
pub mod session;
pub mod store;
pub mod tui;

mod tui_shell;
