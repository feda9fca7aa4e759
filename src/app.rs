//! Top-level flow: parse the command line, load the ssh config, run the
//! command, write the file back when the command changed it.
use std::env;
use std::io::Write;
use tracing::{debug, error};

use crate::cli::{parse_args, Invocation};
use crate::commands::{Context, Outcome};
use crate::config::path::{resolve_ssh_config, settings_path, CONFIG_ENV};
use crate::config::{load_store, save_store, ConfigStore, Settings};
use crate::error::{SshcError, EXIT_ERROR, EXIT_SUCCESS};

/// Runs sshc with the user's settings file and environment.
pub fn run<S: AsRef<str>>(args: &[S], out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let settings = match Settings::load(&settings_path()) {
        Ok(s) => s,
        Err(e) => return report(e, err),
    };
    run_with(args, &settings, env::var(CONFIG_ENV).ok(), out, err)
}

/// Same as [`run`] with explicit settings and `$SSHC_CONFIG` value.
pub fn run_with<S: AsRef<str>>(
    args: &[S],
    settings: &Settings,
    env_config: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match execute(args, settings, env_config, out) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report(e, err),
    }
}

fn execute<S: AsRef<str>>(
    args: &[S],
    settings: &Settings,
    env_config: Option<String>,
    out: &mut dyn Write,
) -> Result<(), SshcError> {
    let inv: Invocation = parse_args(args)?;
    let spec = inv.command.spec();
    debug!(command = %inv.command, args = ?inv.args, "dispatching");

    let path = resolve_ssh_config(
        inv.options.config.as_deref(),
        env_config.as_deref(),
        settings.ssh_config.as_deref(),
    );
    let store = if spec.reads_config {
        load_store(&path, &settings.identity_dir)?
    } else {
        ConfigStore::new(settings.identity_dir.clone())
    };

    inv.require_args()?;

    let mut ctx = Context::new(store, out);
    match (spec.handler)(&mut ctx, &inv)? {
        Outcome::Unchanged => {}
        Outcome::Modified { message } => {
            save_store(&ctx.store, &path)?;
            writeln!(ctx.out, "{message}")?;
        }
    }
    Ok(())
}

/// Prints the failure and returns the exit code.
///
/// Errors that are not meant for the user are logged with their cause chain
/// and reported as a generic failure.
fn report(e: SshcError, err: &mut dyn Write) -> i32 {
    let code = e.exit_code();
    if e.is_user_facing() {
        let _ = writeln!(err, "{e}");
    } else {
        error!("{:#}", anyhow::Error::from(e));
        let _ = writeln!(err, "Error executing command");
    }
    code
}
