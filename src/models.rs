use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// Key of the identity field of every host block.
pub const HOST_KEY: &str = "Host";

/// One `Host` block of the ssh config: ordered `key value` pairs.
///
/// The order of the pairs is the order they were read (or inserted) in and is
/// the order they are written back in. Setting a key that already exists
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecord {
    fields: Vec<(String, String)>,
}

impl HostRecord {
    /// New record holding only its `Host` line.
    pub fn new(host: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.set(HOST_KEY, host);
        record
    }

    /// Alias of the block, if it has a `Host` line.
    pub fn host(&self) -> Option<&str> {
        self.get(HOST_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(idx).1)
    }

    /// Builder-style `set`, handy when assembling a record in one expression.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

// Serialized as a JSON object keeping the block order.
impl Serialize for HostRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parameters the `update` command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Host,
    HostName,
    User,
    IdentityFile,
    Port,
}

impl Param {
    pub const ALL: [Param; 5] = [
        Param::Host,
        Param::HostName,
        Param::User,
        Param::IdentityFile,
        Param::Port,
    ];

    /// Canonical spelling as written in the ssh config.
    pub fn as_str(self) -> &'static str {
        match self {
            Param::Host => HOST_KEY,
            Param::HostName => "HostName",
            Param::User => "User",
            Param::IdentityFile => "IdentityFile",
            Param::Port => "Port",
        }
    }

    /// `Host, HostName, User, IdentityFile, Port`
    pub fn valid_names() -> String {
        Self::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Param {
    type Err = String;

    /// Case-insensitive: `port`, `PORT` and `Port` all give `Param::Port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// New value for a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Set(String),
    Unset,
}

impl FieldValue {
    /// Literal the CLI accepts in place of a value to remove a parameter.
    pub const UNSET: &'static str = "unset";

    pub fn from_arg(arg: &str) -> Self {
        if arg == Self::UNSET {
            FieldValue::Unset
        } else {
            FieldValue::Set(arg.to_string())
        }
    }
}
