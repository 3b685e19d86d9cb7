//! # CLI Layer
//!
//! One client of the attrib library. This is the only place that:
//! - Parses shell arguments
//! - Writes to stdout/stderr and decides the exit code
//! - Installs a tracing subscriber
//!
//! ## Structure
//!
//! - `run()`: dispatch (called by `main.rs`)
//! - `init_context()`: resolves the config file, sets up logging, opens the API
//! - `handle_*()`: per-command handlers that call the API and print results
//! - `print_*()`: output formatting (see `print.rs`)
//!
//! A command whose result carries an error message fails the process after
//! its output is printed.

mod args;
mod print;

use std::path::{Path, PathBuf};

use attrib::api::{AttribApi, CmdResult, ConfigAction, ShowQuery};
use attrib::attributes::{AttrFilter, AttributeKind};
use attrib::config::{AttribConfig, CONFIG_FILENAME};
use attrib::error::{AttrError, Result};
use clap::Parser;
use directories::ProjectDirs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};
use print::{print_config, print_messages, print_shown, print_shown_json};

struct AppContext {
    api: AttribApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Show {
            doc,
            ids,
            kind,
            filters,
            json,
        } => handle_show(&ctx, &doc, ids, kind, filters, json),
        Commands::Apply {
            doc,
            updates,
            replace,
            out,
        } => handle_apply(&ctx, &doc, &updates, replace, out.as_deref()),
        Commands::Check {
            doc,
            service,
            partner,
        } => handle_check(&ctx, &doc, &service, partner.as_deref()),
        Commands::Config { key, value } => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let config = AttribConfig::load(&config_path)?;
    init_tracing(cli.verbose, &config);
    debug!(path = %config_path.display(), "using config");

    Ok(AppContext {
        api: AttribApi::with_config(config_path, config),
    })
}

/// `--config` wins, then `./attrib.json` if present, then the user config dir.
fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = cwd.join(CONFIG_FILENAME);
    if local.exists() {
        return local;
    }

    match ProjectDirs::from("com", "attrib", "attrib") {
        Some(dirs) => dirs.config_dir().join(CONFIG_FILENAME),
        None => local,
    }
}

fn init_tracing(verbose: bool, config: &AttribConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_show(
    ctx: &AppContext,
    doc: &Path,
    ids: Vec<String>,
    kind: Option<String>,
    filters: Vec<String>,
    json: bool,
) -> Result<()> {
    let query = ShowQuery {
        ids,
        kind: kind.as_deref().map(str::parse::<AttributeKind>).transpose()?,
        filters: filters
            .iter()
            .map(|f| AttrFilter::parse(f))
            .collect::<Result<_>>()?,
    };

    let result = ctx.api.show(doc, &query)?;
    if json {
        print_shown_json(&result.shown_attributes, ctx.api.config().pretty)?;
    } else {
        print_shown(&result.shown_attributes);
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_apply(
    ctx: &AppContext,
    doc: &Path,
    updates: &Path,
    replace: bool,
    out: Option<&Path>,
) -> Result<()> {
    let result = ctx.api.apply(doc, updates, replace, out)?;
    print_messages(&result.messages);
    fail_on_errors(&result, "some attributes could not be applied")
}

fn handle_check(
    ctx: &AppContext,
    doc: &Path,
    service: &str,
    partner: Option<&str>,
) -> Result<()> {
    let result = ctx.api.check(doc, service, partner)?;
    print_shown(&result.shown_attributes);
    if !result.shown_attributes.is_empty() {
        println!();
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.configure(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn fail_on_errors(result: &CmdResult, summary: &str) -> Result<()> {
    if result.has_errors() {
        return Err(AttrError::Api(summary.to_string()));
    }
    Ok(())
}
