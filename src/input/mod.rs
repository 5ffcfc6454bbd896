//! Input handling: turning submitted lines into command invocations.

pub mod command;

pub use command::{Builtin, CommandInvocation};
