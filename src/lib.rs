// Library entry so integration tests and the binary (`main.rs`) share the same modules.
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod gamehop;
pub mod handler;
pub mod interactions;
pub mod model;
pub mod storage;
pub mod util;

pub use model::AppState;
