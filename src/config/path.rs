use std::path::PathBuf;

/// Env var overriding the ssh config location.
pub const CONFIG_ENV: &str = "SSHC_CONFIG";

/// `<config_dir>/sshc/config.toml`, falling back to `~/.config` then `.`.
pub fn settings_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("sshc/config.toml")
}

/// `~/.ssh/config`
pub fn default_ssh_config() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ssh/config")
}

/// Expands a leading `~` and `$VARS`; unknown variables are left as-is.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(path).into_owned());
    PathBuf::from(expanded)
}

/// Picks the ssh config to operate on: `--config`, then `$SSHC_CONFIG`,
/// then the settings file, then `~/.ssh/config`.
pub fn resolve_ssh_config(flag: Option<&str>, env: Option<&str>, from_settings: Option<&str>) -> PathBuf {
    flag.or(env)
        .or(from_settings)
        .filter(|p| !p.trim().is_empty())
        .map(expand)
        .unwrap_or_else(default_ssh_config)
}
