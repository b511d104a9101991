//! ut-setup - installer for the Until Then Brazilian Portuguese translation.
//!
//! The installer checks that it is the latest release, finds the game's
//! `UntilThen.pck`, extracts the bundled translation archive and runs the
//! external patcher to merge it into the package.
//!
//! # Modules
//!
//! - [`bundle`] - Translation archive extraction on a worker thread
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `setup.yml` loading, validation and interpolation
//! - [`error`] - Error types and result aliases
//! - [`game`] - Steam discovery and package validation
//! - [`logging`] - Tracing setup and the per-run log file
//! - [`patch`] - Patcher invocation and the package swap
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`updates`] - Connectivity probe and release check
//! - [`wizard`] - The page-by-page installation flow
//!
//! # Example
//!
//! ```
//! use ut_setup::config::{resolve_string, InterpolationContext};
//!
//! let ctx = InterpolationContext::new().with_var("source", "/games/UntilThen.pck");
//! let arg = resolve_string("--pack=${source}", &ctx).unwrap();
//! assert_eq!(arg, "--pack=/games/UntilThen.pck");
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod patch;
pub mod ui;
pub mod updates;
pub mod wizard;

pub use error::{Result, SetupError};
