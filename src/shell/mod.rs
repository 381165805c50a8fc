//! Shell command execution and the external system seam.

pub mod command;
pub mod platform;
pub mod scripted;
pub mod system;

pub use command::{execute, CommandResult};
pub use platform::is_ci;
pub use scripted::ScriptedSystem;
pub use system::{run_checked, ExternalSystem, ShellSystem};
