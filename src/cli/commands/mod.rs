//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`ut-setup install`, `ut-setup restore`)
//! - Shared configuration loading through [`CommandContext`]
//! - Consistent global flag handling

pub mod check_update;
pub mod completions;
pub mod dispatcher;
pub mod extract;
pub mod install;
pub mod locate;
pub mod restore;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
