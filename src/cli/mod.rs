//! Command-line interface module.

mod args;
pub mod check;
pub mod emit;
pub mod init;
pub mod route;

pub use args::{Cli, Commands, EmitArgs};
