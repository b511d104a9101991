//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including every patcher line.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (progress + final status).
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Pick a mode from the global `--verbose`/`--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows tool output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows spinners and progress bars.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_prefers_quiet() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn verbose_shows_everything() {
        let mode = OutputMode::Verbose;
        assert!(mode.shows_command_output());
        assert!(mode.shows_spinners());
        assert!(mode.shows_status());
    }

    #[test]
    fn silent_shows_nothing() {
        let mode = OutputMode::Silent;
        assert!(!mode.shows_command_output());
        assert!(!mode.shows_spinners());
        assert!(!mode.shows_status());
    }

    #[test]
    fn quiet_keeps_spinners() {
        let mode = OutputMode::Quiet;
        assert!(!mode.shows_command_output());
        assert!(mode.shows_spinners());
    }
}
