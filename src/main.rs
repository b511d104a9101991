//! ut-setup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use ut_setup::cli::{is_ci, report_error, Cli, CommandContext, CommandDispatcher, Commands};
use ut_setup::logging;
use ut_setup::ui::{create_ui, OutputMode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let log_path = logging::init(cli.debug, cli.log_file.as_deref());
    tracing::debug!("ut-setup starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Check if non-interactive (CI mode or explicit flag)
    let is_interactive = match &cli.command {
        Some(Commands::Install(args)) => !args.non_interactive && !is_ci(),
        _ => !is_ci(),
    };

    let mut ui = create_ui(is_interactive, output_mode);

    let context = CommandContext::from_cli(&cli, log_path.clone());
    let dispatcher = CommandDispatcher::new(context);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            report_error(ui.as_mut(), &e, log_path.as_deref());
            ExitCode::from(e.exit_code())
        }
    }
}
