//! Project Scaffolding Workflow
//!
//! The thin top-level glue around the input subsystem: collect a project
//! name, create the directory, register it with the abort coordinator
//! until setup completes, pick a project kind, and write the initial
//! files. External tooling beyond `git init` is deliberately not invoked
//! from here.
//!
//! ## Module Structure
//!
//! - `config` - On-disk configuration with defaults
//! - `templates` - Project kinds and their `.gitignore` bodies

pub mod config;
pub mod templates;

pub use config::ScaffoldConfig;
pub use templates::ProjectKind;

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;

use crossterm::style::Stylize;
use inquire::{InquireError, Select};

use crate::abort;
use crate::input::{EditOutcome, EditSession};

/// Run the interactive scaffolding workflow end to end.
pub fn run(config: &ScaffoldConfig) -> io::Result<()> {
    println!("{}", "mkproj - interactive project scaffolding".bold());
    println!("Press Esc on the name prompt or Ctrl+C at any time to abort.");
    println!();

    let name = prompt_project_name(config)?;
    let path = project_path(config, &name)?;

    fs::create_dir(&path)?;
    // From here until setup completes, cancellation removes the directory.
    abort::set_pending(path.clone());
    abort::exit_if_interrupted();

    let kind = pick_project_kind()?;
    fs::write(path.join(".gitignore"), kind.gitignore())?;
    println!("Wrote {} .gitignore", kind.label());
    abort::exit_if_interrupted();

    maybe_git_init(config, &path)?;
    abort::exit_if_interrupted();

    abort::clear_pending();
    println!();
    println!("{} {}", "Created".green(), path.display());
    Ok(())
}

/// Ask for the project name until a usable one is submitted. ESC here
/// aborts the whole run (there is nothing to continue without a name).
fn prompt_project_name(config: &ScaffoldConfig) -> io::Result<String> {
    loop {
        let session = EditSession::new("Project name: ", "", true)
            .with_esc_timeout(config.esc_timeout());
        let name = match session.run()? {
            EditOutcome::Submitted(name) => name,
            EditOutcome::Cancelled => continue,
        };
        if valid_project_name(&name) {
            return Ok(name);
        }
        println!(
            "{}",
            "Names may contain letters, digits, '-', '_' and '.'".yellow()
        );
    }
}

/// Project names become directory names; keep them to a portable subset.
fn valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

/// Where the new project directory goes; refuses to clobber an existing one.
fn project_path(config: &ScaffoldConfig, name: &str) -> io::Result<PathBuf> {
    let base = match &config.projects_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => env::current_dir()?,
    };
    let path = base.join(name);
    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        ));
    }
    Ok(path)
}

/// Interactive project-kind menu. Cancelling the menu falls back to a
/// plain project rather than aborting the run.
fn pick_project_kind() -> io::Result<ProjectKind> {
    let selection = Select::new("Project type:", ProjectKind::menu_entries())
        .with_page_size(10)
        .with_help_message("Use arrow keys to navigate, Enter to select, Esc for plain")
        .prompt();

    match selection {
        Ok(label) => Ok(ProjectKind::from_label(&label).unwrap_or(ProjectKind::Plain)),
        Err(InquireError::OperationCanceled) => Ok(ProjectKind::Plain),
        Err(InquireError::OperationInterrupted) => {
            abort::cancel_and_exit("Interrupted.", abort::SIGNAL_EXIT_CODE)
        }
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}

/// Optional sub-prompt: ESC here just means "no", not "abort everything".
fn maybe_git_init(config: &ScaffoldConfig, path: &std::path::Path) -> io::Result<()> {
    let session = EditSession::new("Initialize a git repository? [y/N] ", "N", false)
        .with_esc_timeout(config.esc_timeout());
    let answer = match session.run()? {
        EditOutcome::Submitted(answer) => answer,
        EditOutcome::Cancelled => return Ok(()),
    };
    if !answer.eq_ignore_ascii_case("y") {
        return Ok(());
    }

    let status = Command::new("git").arg("init").current_dir(path).status();
    match status {
        Ok(status) if status.success() => println!("Initialized git repository"),
        Ok(status) => eprintln!("warning: git init exited with {}", status),
        Err(e) => eprintln!("warning: could not run git init: {}", e),
    }
    io::stdout().flush()?;
    Ok(())
}
