pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod fill;
pub mod listen;
pub mod runtime;

pub use config::{cmd_config, ConfigAction, ConfigArgs};
pub use fill::{cmd_fill, FillArgs};
pub use listen::{cmd_listen, ListenArgs};
