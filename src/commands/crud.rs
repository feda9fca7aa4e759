use std::sync::OnceLock;
use regex::Regex;
use crate::cli::Invocation;
use crate::commands::{Context, Outcome};
use crate::error::SshcError;
use crate::models::{FieldValue, HostRecord, Param};

/// A `user@hostname[:port]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub user: String,
    pub hostname: String,
    pub port: Option<String>,
}

fn user_host_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)@(.+)$").expect("static regex"))
}

/// Splits `user@hostname[:port]`. The user is everything before the last `@`.
pub fn parse_target(arg: &str) -> Result<Target, SshcError> {
    let invalid = || SshcError::InvalidUserHost(arg.to_string());
    let caps = user_host_re().captures(arg).ok_or_else(invalid)?;
    let user = caps[1].to_string();
    let mut server = caps[2].split(':');
    let hostname = server.next().filter(|h| !h.is_empty()).ok_or_else(invalid)?.to_string();
    let port = match server.next() {
        Some(p) if p.parse::<u16>().is_ok() => Some(p.to_string()),
        Some(_) => return Err(invalid()),
        None => None,
    };
    Ok(Target { user, hostname, port })
}

pub fn add(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Outcome, SshcError> {
    let host = inv.arg(0).unwrap_or_default();
    if ctx.store.get(host).is_some() {
        return Err(SshcError::HostAlreadyExists(host.to_string()));
    }
    let target = parse_target(inv.arg(1).unwrap_or_default())?;

    let mut record = HostRecord::new(host)
        .with(Param::HostName.as_str(), target.hostname)
        .with(Param::User.as_str(), target.user);
    if let Some(port) = target.port {
        record.set(Param::Port.as_str(), port);
    }
    if let Some(key) = inv.arg(2) {
        record.set(Param::IdentityFile.as_str(), ctx.store.identity_path(key));
    }

    ctx.store.add(record)?;
    Ok(Outcome::modified(format!("{host} has been added to the config file")))
}

pub fn remove(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Outcome, SshcError> {
    let host = inv.arg(0).unwrap_or_default();
    ctx.require_host(host)?;
    ctx.store.remove(host)?;
    Ok(Outcome::modified(format!("{host} removed from config file")))
}

pub fn update(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Outcome, SshcError> {
    let host = inv.arg(0).unwrap_or_default();
    ctx.require_host(host)?;

    let raw_param = inv.arg(1).unwrap_or_default();
    let param: Param = raw_param.parse().map_err(|parameter| SshcError::InvalidParameter {
        parameter,
        valid: Param::valid_names(),
    })?;
    let value = FieldValue::from_arg(inv.arg(2).unwrap_or_default());

    if let (Param::Host, FieldValue::Set(new)) = (param, &value) {
        if new != host && ctx.store.get(new).is_some() {
            return Err(SshcError::HostAlreadyExists(new.clone()));
        }
    }

    let message = match &value {
        FieldValue::Unset => format!("{host}: {param} has been removed"),
        FieldValue::Set(v) if param == Param::IdentityFile => {
            format!("{host}: {param} has been set to {}", ctx.store.identity_path(v))
        }
        FieldValue::Set(v) => format!("{host}: {param} has been set to {v}"),
    };
    ctx.store.update_field(host, param, value)?;
    Ok(Outcome::modified(message))
}

pub fn sort(ctx: &mut Context<'_>, _inv: &Invocation) -> Result<Outcome, SshcError> {
    ctx.store.sort();
    Ok(Outcome::modified("Config file sorted!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_args;
    use crate::config::ConfigStore;

    fn run(store: ConfigStore, args: &[&str]) -> (ConfigStore, Result<Outcome, SshcError>) {
        let inv = parse_args(args).unwrap();
        let mut out = Vec::new();
        let mut ctx = Context::new(store, &mut out);
        let res = (inv.command.spec().handler)(&mut ctx, &inv);
        (ctx.store, res)
    }

    fn alpha() -> ConfigStore {
        ConfigStore::parse("Host alpha\nHostName 1.2.3.4\nUser bob\n\n").unwrap()
    }

    #[test]
    fn test_parse_target() {
        let t = parse_target("bob@5.6.7.8:2222").unwrap();
        assert_eq!(t, Target { user: "bob".into(), hostname: "5.6.7.8".into(), port: Some("2222".into()) });
        let t = parse_target("me@corp@example.com").unwrap();
        assert_eq!(t.user, "me@corp");
        assert_eq!(t.hostname, "example.com");
        assert_eq!(t.port, None);
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        assert!(matches!(parse_target("example.com"), Err(SshcError::InvalidUserHost(_))));
        assert!(parse_target("bob@host:ssh").is_err());
        assert!(parse_target("bob@:22").is_err());
    }

    #[test]
    fn test_add_builds_record_in_order() {
        let (store, res) = run(alpha(), &["add", "beta", "bob@5.6.7.8:2222", "mykey"]);
        assert_eq!(res.unwrap(), Outcome::modified("beta has been added to the config file"));
        let beta = store.get("beta").unwrap();
        let keys: Vec<&str> = beta.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Host", "HostName", "User", "Port", "IdentityFile"]);
        assert_eq!(beta.get("IdentityFile"), Some("~/.ssh/mykey"));
    }

    #[test]
    fn test_add_duplicate() {
        let (store, res) = run(alpha(), &["add", "alpha", "eve@9.9.9.9"]);
        assert!(matches!(res, Err(SshcError::HostAlreadyExists(h)) if h == "alpha"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_rejects_unknown_parameter() {
        let (_, res) = run(alpha(), &["update", "alpha", "ProxyJump", "bastion"]);
        let err = res.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter 'ProxyJump' is not valid, valid parameters are: Host, HostName, User, IdentityFile, Port"
        );
    }

    #[test]
    fn test_update_missing_host_suggests() {
        let (_, res) = run(alpha(), &["update", "alp", "port", "22"]);
        assert!(matches!(res, Err(SshcError::HostNotFound { suggestion: Some(s), .. }) if s == "alpha"));
    }

    #[test]
    fn test_update_identity_file_message() {
        let (store, res) = run(alpha(), &["update", "alpha", "identityfile", "id_rsa"]);
        assert_eq!(res.unwrap(), Outcome::modified("alpha: IdentityFile has been set to ~/.ssh/id_rsa"));
        assert_eq!(store.get("alpha").unwrap().get("IdentityFile"), Some("~/.ssh/id_rsa"));
    }

    #[test]
    fn test_update_rename_onto_existing_host() {
        let mut store = alpha();
        store.add(HostRecord::new("beta")).unwrap();
        let (store, res) = run(store, &["update", "beta", "host", "alpha"]);
        assert!(matches!(res, Err(SshcError::HostAlreadyExists(_))));
        assert!(store.get("beta").is_some());
    }

    #[test]
    fn test_update_rename() {
        let (store, res) = run(alpha(), &["update", "alpha", "host", "omega"]);
        assert!(res.is_ok());
        assert!(store.get("alpha").is_none());
        assert_eq!(store.get("omega").unwrap().get("User"), Some("bob"));
    }

    #[test]
    fn test_update_unset_host_is_rejected() {
        let (store, res) = run(alpha(), &["update", "alpha", "host", "unset"]);
        assert!(matches!(res, Err(SshcError::Store(_))));
        assert!(store.get("alpha").is_some());
    }

    #[test]
    fn test_remove_missing() {
        let (store, res) = run(alpha(), &["remove", "nope"]);
        assert!(matches!(res, Err(SshcError::HostNotFound { .. })));
        assert_eq!(store.len(), 1);
    }
}
