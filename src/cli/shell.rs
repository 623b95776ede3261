use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};
use shell_words::split;

use crate::cli::commands::ShellContext;
use crate::cli::{output, CliError, CliMode, LoopControl};
use crate::store::DdayStore;

/// Entry point for `dday_cli`. Set `DDAY_CLI_SCRIPT` to feed commands from
/// stdin without the line editor (used by scripted runs and tests).
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("DDAY_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let store = DdayStore::open_default()?;
    let mut context = ShellContext::new(store, mode);

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    output::section("하루모아 D-Day");
    output::info("Type 'help' for commands.");

    loop {
        let line = editor.readline("dday> ");
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => output::error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => output::error(err),
        }
    }
    Ok(())
}

fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, crate::cli::CommandError> {
    let tokens = split(line)
        .map_err(|err| crate::cli::CommandError::new(format!("Parse error: {err}")))?;
    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }
    context.dispatch(&tokens)
}
