// Portfolio shell library - exposes the interpreter and its collaborators

pub mod app;
pub mod config;
pub mod config_io;
pub mod input;
pub mod model;
pub mod services;
#[cfg(feature = "runtime")]
pub mod view;

pub use app::{Dispatch, Interpreter, PendingAsk};
pub use config::Config;
pub use model::profile::Profile;
