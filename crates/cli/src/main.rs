use std::collections::HashMap;
use std::env;
use std::io::{stdout, Write};
use std::process::{Command, ExitCode};

use clap::Parser;
use log::{debug, warn};

use grimoire_cli::cli_args::{Args, SpellCommand};
use grimoire_cli::command_selection::{self, SpellChoice, SpellForDisplay};
use grimoire_core::config::{self, DEFAULT_EDITOR, DEFAULT_SHELL};
use grimoire_core::error::Result;
use grimoire_core::execution;
use grimoire_core::file_handling;
use grimoire_core::templating::SpellTemplate;

fn execute() -> Result<()> {
    let args = Args::parse();

    let config = config::load_config(&args.config_path)?;
    let spell_path = config::get_spell_path(&args.spell_path, &config);
    debug!("Spell path: `{spell_path}`");

    file_handling::ensure_spell_dir(&spell_path)?;

    match args.command {
        SpellCommand::Add { tags, fields } => add_spell(&spell_path, tags.as_deref(), &fields),
        SpellCommand::Edit => {
            let editor = resolve_program(config.editor.as_deref(), "EDITOR", DEFAULT_EDITOR);
            edit_spell(&spell_path, &editor)
        }
        SpellCommand::View => view_spell(&spell_path),
        SpellCommand::Find => find_spell(&spell_path),
        SpellCommand::Cast { dry_run } => {
            let shell = resolve_program(config.shell.as_deref(), "SHELL", DEFAULT_SHELL);
            cast_spell(&spell_path, &shell, dry_run)
        }
        SpellCommand::Forget => forget_spell(&spell_path),
    }
}

/// Resolution order: config file, then environment, then built-in default.
fn resolve_program(configured: Option<&str>, env_var: &str, default: &str) -> String {
    match configured {
        Some(program) => program.to_string(),
        None => env::var(env_var).unwrap_or_else(|_| default.to_string()),
    }
}

/// Runs the picker over the stored spells.
///
/// Returns `None` when the grimoire is empty or the user cancels, printing
/// why; every subcommand treats that as a clean exit.
fn select_spell(spell_path: &str) -> Result<Option<SpellForDisplay>> {
    let filenames = file_handling::list_spell_files(spell_path)?;

    let mut spells = Vec::with_capacity(filenames.len());
    for filename in filenames {
        match file_handling::read_spell(spell_path, &filename) {
            Ok(entry) => spells.push(SpellForDisplay { filename, entry }),
            Err(e) => warn!("Skipping unreadable spell `{filename}`: {e}"),
        }
    }

    if spells.is_empty() {
        println!("The grimoire is empty. Add a spell with `grim add`.");
        return Ok(None);
    }

    match command_selection::prompt_for_spell_choice(&spells)? {
        SpellChoice::Index(index) => Ok(Some(spells.swap_remove(index))),
        SpellChoice::Quit => {
            println!("No spell selected");
            Ok(None)
        }
    }
}

fn add_spell(spell_path: &str, tags: Option<&str>, fields: &[String]) -> Result<()> {
    let mut entry = command_selection::prompt_spell_fields(fields)?;

    if let Some(tags) = tags {
        entry.tags = tags
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
    }

    let filename = file_handling::write_spell(spell_path, &entry)?;
    println!("{} written as {}", entry.name, filename);

    Ok(())
}

fn edit_spell(spell_path: &str, editor: &str) -> Result<()> {
    let Some(spell) = select_spell(spell_path)? else {
        return Ok(());
    };

    let mut command = Command::new(editor);
    command.arg(file_handling::spell_file_path(spell_path, &spell.filename));

    execution::execute_command(command)
}

fn view_spell(spell_path: &str) -> Result<()> {
    let Some(spell) = select_spell(spell_path)? else {
        return Ok(());
    };

    let contents = file_handling::read_spell_record(spell_path, &spell.filename)?;
    println!("{}", contents.trim_end_matches('\n'));

    Ok(())
}

fn find_spell(spell_path: &str) -> Result<()> {
    let Some(spell) = select_spell(spell_path)? else {
        return Ok(());
    };

    // No trailing newline: the output is meant for command substitution.
    print!("{}", spell.entry.spell);
    stdout().flush()?;

    Ok(())
}

fn cast_spell(spell_path: &str, shell: &str, dry_run: bool) -> Result<()> {
    let Some(spell) = select_spell(spell_path)? else {
        return Ok(());
    };

    let template = SpellTemplate::parse(&spell.entry.spell)?;

    let values = if template.has_parameters() {
        println!("Casting: {}", template.raw());
        command_selection::prompt_parameter_values(&template)?
    } else {
        HashMap::new()
    };

    let final_command = template.reconstruct(&values)?;
    println!("{final_command}");

    if dry_run {
        println!("Dry run is specified, exiting without casting.");
        return Ok(());
    }

    let mut command = Command::new(shell);
    command.args(["-c", &final_command]);

    execution::execute_command(command)
}

fn forget_spell(spell_path: &str) -> Result<()> {
    let Some(spell) = select_spell(spell_path)? else {
        return Ok(());
    };

    let destination = file_handling::forget_spell(spell_path, &spell.filename)?;
    println!("{} moved to {}", spell.filename, destination.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
