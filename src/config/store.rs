//! In-memory ssh config: ordered host blocks plus the operations the commands need.
use crate::error::{ParseError, StoreError};
use crate::models::{FieldValue, HostRecord, Param, HOST_KEY};
use tracing::{debug, warn};

/// Default directory identity file names are rooted at.
pub const DEFAULT_IDENTITY_DIR: &str = "~/.ssh/";

/// Host blocks of one ssh config file, in file order unless sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    hosts: Vec<HostRecord>,
    identity_dir: String,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_DIR)
    }
}

impl ConfigStore {
    pub fn new(identity_dir: impl Into<String>) -> Self {
        Self { hosts: Vec::new(), identity_dir: identity_dir.into() }
    }

    /// Parse config text with the default identity directory.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, DEFAULT_IDENTITY_DIR)
    }

    /// Parse config text into host blocks.
    ///
    /// Blank lines close a block. Every other line is read as its first two
    /// whitespace separated tokens; anything after the value is dropped. A
    /// block still open at end of input has no closing blank line and is
    /// dropped as well.
    pub fn parse_with(text: &str, identity_dir: impl Into<String>) -> Result<Self, ParseError> {
        let mut store = Self::new(identity_dir);
        let mut current = HostRecord::default();
        let mut block_start = 0usize;

        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                if !current.is_empty() {
                    if current.host().is_none() {
                        return Err(ParseError::MissingHost { line: block_start });
                    }
                    store.push_parsed(std::mem::take(&mut current));
                }
                continue;
            };
            let Some(value) = tokens.next() else {
                return Err(ParseError::MalformedLine { line: lineno });
            };
            if current.is_empty() {
                block_start = lineno;
            }
            current.set(key, value);
        }

        if !current.is_empty() {
            warn!(
                host = current.host().unwrap_or("<none>"),
                line = block_start,
                "last block is not followed by a blank line; dropping it"
            );
        }
        debug!(hosts = store.hosts.len(), "parsed ssh config");
        Ok(store)
    }

    fn push_parsed(&mut self, record: HostRecord) {
        if let Some(host) = record.host() {
            if self.get(host).is_some() {
                warn!(host, "duplicate Host entry; only the first one is used");
            }
        }
        self.hosts.push(record);
    }

    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// First block whose `Host` is exactly `host`.
    pub fn get(&self, host: &str) -> Option<&HostRecord> {
        self.hosts.iter().find(|r| r.host() == Some(host))
    }

    fn get_mut(&mut self, host: &str) -> Option<&mut HostRecord> {
        self.hosts.iter_mut().find(|r| r.host() == Some(host))
    }

    /// Appends `record`. Duplicate aliases are the caller's concern.
    ///
    /// Every value has to read back as the same single token once saved.
    pub fn add(&mut self, record: HostRecord) -> Result<(), StoreError> {
        if record.host().is_none() {
            return Err(invalid_value(HOST_KEY, ""));
        }
        for (k, v) in record.fields() {
            check_value(k, v)?;
        }
        debug!(host = record.host().unwrap_or_default(), "adding host");
        self.hosts.push(record);
        Ok(())
    }

    /// Removes the first block for `host` and hands it back.
    pub fn remove(&mut self, host: &str) -> Result<HostRecord, StoreError> {
        let idx = self
            .hosts
            .iter()
            .position(|r| r.host() == Some(host))
            .ok_or_else(|| StoreError::HostNotFound(host.to_string()))?;
        debug!(host, "removing host");
        Ok(self.hosts.remove(idx))
    }

    /// Sets or unsets one parameter of `host`.
    ///
    /// `IdentityFile` values are file names and get stored under the
    /// identity directory. Unsetting a parameter that is not there is a no-op.
    pub fn update_field(&mut self, host: &str, param: Param, value: FieldValue) -> Result<(), StoreError> {
        if let FieldValue::Set(v) = &value {
            check_value(param.as_str(), v)?;
        }
        let value = match value {
            FieldValue::Set(v) if param == Param::IdentityFile => FieldValue::Set(self.identity_path(&v)),
            other => other,
        };
        let record = self
            .get_mut(host)
            .ok_or_else(|| StoreError::HostNotFound(host.to_string()))?;

        match value {
            FieldValue::Unset if param == Param::Host => {
                return Err(StoreError::CannotUnsetHost(host.to_string()));
            }
            FieldValue::Unset => {
                if record.remove(param.as_str()).is_none() {
                    debug!(host, %param, "parameter already unset");
                }
            }
            FieldValue::Set(v) => {
                debug!(host, %param, value = %v, "setting parameter");
                record.set(param.as_str(), v);
            }
        }
        Ok(())
    }

    /// Full path an identity file name is stored as.
    pub fn identity_path(&self, file_name: &str) -> String {
        format!("{}{}", self.identity_dir, file_name)
    }

    /// Orders blocks by `Host`.
    pub fn sort(&mut self) {
        self.hosts.sort_by(|a, b| a.host().cmp(&b.host()));
    }

    /// Renders the blocks back to ssh config text.
    ///
    /// `Host` always comes first, followed by the other pairs in block order,
    /// and every block ends with a blank line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for record in &self.hosts {
            out.push_str(&format!("{HOST_KEY} {}\n", record.host().unwrap_or_default()));
            for (k, v) in record.fields().filter(|(k, _)| *k != HOST_KEY) {
                out.push_str(&format!("{k} {v}\n"));
            }
            out.push('\n');
        }
        out
    }
}

/// Values are written as `key value` and read back as the second token only.
fn check_value(key: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(invalid_value(key, value));
    }
    Ok(())
}

fn invalid_value(key: &str, value: &str) -> StoreError {
    StoreError::InvalidValue { param: key.to_string(), value: value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Host alpha\nHostName 1.2.3.4\nUser bob\n\nHost beta\nHostName 5.6.7.8\nPort 2222\n\n";

    fn aliases(store: &ConfigStore) -> Vec<&str> {
        store.hosts().iter().filter_map(|r| r.host()).collect()
    }

    #[test]
    fn test_parse_blocks_in_order() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(aliases(&store), vec!["alpha", "beta"]);
        let alpha = store.get("alpha").unwrap();
        assert_eq!(alpha.get("HostName"), Some("1.2.3.4"));
        assert_eq!(alpha.get("User"), Some("bob"));
    }

    #[test]
    fn test_parse_drops_unterminated_last_block() {
        let store = ConfigStore::parse("Host alpha\nUser bob\n\nHost beta\nUser eve\n").unwrap();
        assert_eq!(aliases(&store), vec!["alpha"]);
    }

    #[test]
    fn test_parse_keeps_only_first_two_tokens() {
        let store = ConfigStore::parse("Host alpha\nProxyCommand ssh -W %h:%p jump\n\n").unwrap();
        assert_eq!(store.get("alpha").unwrap().get("ProxyCommand"), Some("ssh"));
    }

    #[test]
    fn test_parse_accepts_unknown_parameters() {
        let store = ConfigStore::parse("Host alpha\nForwardAgent yes\n\n").unwrap();
        assert_eq!(store.get("alpha").unwrap().get("ForwardAgent"), Some("yes"));
    }

    #[test]
    fn test_parse_collapses_repeated_blank_lines() {
        let store = ConfigStore::parse("\n\nHost alpha\nUser bob\n\n\n  \nHost beta\nUser eve\n\n").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_parse_rejects_single_token_line() {
        let err = ConfigStore::parse("Host alpha\nUser\n\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedLine { line: 2 });
    }

    #[test]
    fn test_parse_rejects_block_without_host() {
        let err = ConfigStore::parse("Host alpha\n\nUser bob\nPort 22\n\n").unwrap_err();
        assert_eq!(err, ParseError::MissingHost { line: 3 });
    }

    #[test]
    fn test_parse_accepts_duplicate_hosts_first_wins() {
        let store = ConfigStore::parse("Host a\nUser one\n\nHost a\nUser two\n\n").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().get("User"), Some("one"));
    }

    #[test]
    fn test_round_trip() {
        let first = ConfigStore::parse(SAMPLE).unwrap();
        let second = ConfigStore::parse(&first.serialize()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.serialize(), SAMPLE);
    }

    #[test]
    fn test_serialize_is_not_destructive() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.serialize(), store.serialize());
        assert!(store.get("alpha").is_some());
    }

    #[test]
    fn test_serialize_puts_host_first() {
        let mut store = ConfigStore::default();
        let mut rec = HostRecord::default();
        rec.set("User", "bob");
        rec.set(HOST_KEY, "gamma");
        store.add(rec).unwrap();
        assert_eq!(store.serialize(), "Host gamma\nUser bob\n\n");
    }

    #[test]
    fn test_get_after_add() {
        let mut store = ConfigStore::default();
        let rec = HostRecord::new("delta").with("User", "carol");
        store.add(rec.clone()).unwrap();
        assert_eq!(store.get("delta"), Some(&rec));
        assert_eq!(store.get("Delta"), None);
        assert_eq!(store.get("epsilon"), None);
    }

    #[test]
    fn test_remove() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        let removed = store.remove("alpha").unwrap();
        assert_eq!(removed.host(), Some("alpha"));
        assert_eq!(aliases(&store), vec!["beta"]);
        assert_eq!(store.remove("alpha"), Err(StoreError::HostNotFound("alpha".into())));
        assert_eq!(store.len(), 1);
        store.remove("beta").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.serialize(), "");
    }

    #[test]
    fn test_update_sets_and_overwrites() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        store.update_field("alpha", Param::Port, FieldValue::Set("22".into())).unwrap();
        store.update_field("alpha", Param::User, FieldValue::Set("alice".into())).unwrap();
        let alpha = store.get("alpha").unwrap();
        assert_eq!(alpha.get("Port"), Some("22"));
        assert_eq!(alpha.get("User"), Some("alice"));
    }

    #[test]
    fn test_update_unset_is_idempotent() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        store.update_field("alpha", Param::User, FieldValue::Unset).unwrap();
        store.update_field("alpha", Param::User, FieldValue::Unset).unwrap();
        assert!(!store.get("alpha").unwrap().contains("User"));
    }

    #[test]
    fn test_update_identity_file_is_rooted() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        store.update_field("beta", Param::IdentityFile, FieldValue::Set("id_rsa".into())).unwrap();
        assert_eq!(store.get("beta").unwrap().get("IdentityFile"), Some("~/.ssh/id_rsa"));

        let mut custom = ConfigStore::parse_with(SAMPLE, "/keys/").unwrap();
        custom.update_field("beta", Param::IdentityFile, FieldValue::Set("id_rsa".into())).unwrap();
        assert_eq!(custom.get("beta").unwrap().get("IdentityFile"), Some("/keys/id_rsa"));
    }

    #[test]
    fn test_update_missing_host() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        let err = store.update_field("nope", Param::Port, FieldValue::Set("22".into())).unwrap_err();
        assert_eq!(err, StoreError::HostNotFound("nope".into()));
    }

    #[test]
    fn test_update_cannot_unset_host() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        let err = store.update_field("alpha", Param::Host, FieldValue::Unset).unwrap_err();
        assert_eq!(err, StoreError::CannotUnsetHost("alpha".into()));
        assert!(store.get("alpha").is_some());
    }

    #[test]
    fn test_sort() {
        let mut store = ConfigStore::parse("Host zulu\nUser a\n\nHost alpha\nUser b\n\nHost mike\nUser c\n\n").unwrap();
        store.sort();
        assert_eq!(aliases(&store), vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn test_update_rejects_values_that_do_not_round_trip() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        for bad in ["", "two words", "tab\there"] {
            let err = store.update_field("alpha", Param::User, FieldValue::Set(bad.into())).unwrap_err();
            assert_eq!(err, StoreError::InvalidValue { param: "User".into(), value: bad.into() });
        }
        assert_eq!(store.serialize(), SAMPLE);
    }

    #[test]
    fn test_add_rejects_values_that_do_not_round_trip() {
        let mut store = ConfigStore::parse(SAMPLE).unwrap();
        let err = store.add(HostRecord::new("my box").with("User", "bob")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { ref param, .. } if param == "Host"));
        assert!(store.add(HostRecord::new("gamma").with("User", "")).is_err());
        assert!(store.add(HostRecord::default().with("User", "bob")).is_err());
        assert_eq!(store.len(), 2);

        store.add(HostRecord::new("gamma").with("User", "carol")).unwrap();
        let reparsed = ConfigStore::parse(&store.serialize()).unwrap();
        assert_eq!(reparsed, store);
    }
}
