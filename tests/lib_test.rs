//! Library integration tests.

use std::path::PathBuf;

use ut_setup::game::GameError;
use ut_setup::SetupError;

#[test]
fn error_types_are_public() {
    let err = SetupError::from(GameError::Missing {
        path: PathBuf::from("/games/UntilThen.pck"),
    });
    assert!(err.to_string().contains("/games/UntilThen.pck"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> ut_setup::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use ut_setup::cli::{Cli, Commands};

    let cli = Cli::parse_from(["ut-setup", "check-update", "--json"]);

    if let Some(Commands::CheckUpdate(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected CheckUpdate command");
    }
}

#[test]
fn wizard_runs_against_mock_ui() {
    use ut_setup::config::LoadedConfig;
    use ut_setup::ui::MockUI;
    use ut_setup::updates::{ReleaseCheck, VersionCheck};
    use ut_setup::wizard::{SetupState, Wizard, WizardOptions};

    struct Offline;
    impl ReleaseCheck for Offline {
        fn current(&self) -> &str {
            "1.2.0"
        }
        fn check(&self) -> VersionCheck {
            VersionCheck::Offline
        }
    }

    let temp = tempfile::TempDir::new().unwrap();
    let mut options = WizardOptions::from_config(&LoadedConfig::defaults(temp.path()));
    options.steam_roots = vec![temp.path().join("no-steam")];

    let mut ui = MockUI::new();
    let state = SetupState::new("1.2.0").unwrap();
    let err = Wizard::new(&mut ui, options, Box::new(Offline), state)
        .run()
        .unwrap_err();

    // Offline, retry declined by default, then nothing to locate.
    assert_eq!(err.exit_code(), 2);
    assert!(ui.prompts_shown().contains(&"retry_connection".to_string()));
}
