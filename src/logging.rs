use tracing_subscriber::EnvFilter;

/// Env var holding the log filter, e.g. `SSHC_LOG=debug`.
pub const LOG_ENV: &str = "SSHC_LOG";

/// Logs go to stderr so they never mix with command output.
/// Defaults to `warn` when `SSHC_LOG` is unset or invalid.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
