//! Command line parsing and the command table.
use std::fmt;
use std::io::Write;

use crate::commands::{crud, help, list, Context, Outcome};
use crate::error::SshcError;

/// Every command sshc knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    List,
    Get,
    Add,
    Remove,
    Update,
    Sort,
}

pub type Handler = fn(&mut Context<'_>, &Invocation) -> Result<Outcome, SshcError>;

/// One row of the command table.
pub struct CommandSpec {
    pub kind: CommandKind,
    pub name: &'static str,
    /// Required positional arguments, in order.
    pub args: &'static [&'static str],
    /// Usage shown by `help`.
    pub usage: &'static str,
    pub summary: &'static str,
    /// Options the command accepts besides `--config`.
    pub options: &'static [&'static str],
    /// Whether the ssh config has to be loaded before running.
    pub reads_config: bool,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        kind: CommandKind::Help,
        name: "help",
        args: &[],
        usage: "help",
        summary: "Prints this list",
        options: &[],
        reads_config: false,
        handler: help::help,
    },
    CommandSpec {
        kind: CommandKind::List,
        name: "list",
        args: &[],
        usage: "list [--filter <expr>] [--table|--json]",
        summary: "Lists all hosts",
        options: &["--filter", "--table", "--json"],
        reads_config: true,
        handler: list::list,
    },
    CommandSpec {
        kind: CommandKind::Get,
        name: "get",
        args: &["host"],
        usage: "get <host> [--json]",
        summary: "Returns information for chosen host",
        options: &["--json"],
        reads_config: true,
        handler: list::get,
    },
    CommandSpec {
        kind: CommandKind::Remove,
        name: "remove",
        args: &["host"],
        usage: "remove <host>",
        summary: "Removes a host",
        options: &[],
        reads_config: true,
        handler: crud::remove,
    },
    CommandSpec {
        kind: CommandKind::Sort,
        name: "sort",
        args: &[],
        usage: "sort",
        summary: "Sorts the host file alphabetically",
        options: &[],
        reads_config: true,
        handler: crud::sort,
    },
    CommandSpec {
        kind: CommandKind::Add,
        name: "add",
        args: &["host", "user@server"],
        usage: "add <host> <user>@<hostname>[:port] [key file]",
        summary: "Adds a new host",
        options: &[],
        reads_config: true,
        handler: crud::add,
    },
    CommandSpec {
        kind: CommandKind::Update,
        name: "update",
        args: &["host", "parameter", "value"],
        usage: "update <host> <parameter> <value|unset>",
        summary: "Sets a parameter of a host, removes it if value is unset",
        options: &[],
        reads_config: true,
        handler: crud::update,
    },
];

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS.iter().find(|c| c.name == name).map(|c| c.kind)
    }

    pub fn spec(self) -> &'static CommandSpec {
        // Every variant has a row in COMMANDS.
        COMMANDS
            .iter()
            .find(|c| c.kind == self)
            .unwrap_or(&COMMANDS[0])
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Flags that can follow any command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub config: Option<String>,
    pub filter: Option<String>,
    pub table: bool,
    pub json: bool,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandKind,
    pub args: Vec<String>,
    pub options: Options,
}

impl Invocation {
    /// Positional argument `idx`, after the command name.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }

    /// Fails unless every required argument of the command is present.
    pub fn require_args(&self) -> Result<(), SshcError> {
        let names = self.command.spec().args;
        if self.args.len() < names.len() {
            return Err(SshcError::InsufficientArguments { names: names.to_vec() });
        }
        Ok(())
    }
}

/// Parses the arguments that follow the program name.
///
/// With no command at all, `list` is run. Everything after a bare `--` is
/// positional, so values starting with `-` can be passed.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, SshcError> {
    let mut options = Options::default();
    let mut positional: Vec<String> = Vec::new();
    let mut given: Vec<&'static str> = Vec::new();

    let mut iter = args.iter().map(AsRef::<str>::as_ref);
    while let Some(arg) = iter.next() {
        match arg {
            "--config" | "-c" => {
                options.config = Some(take_value(&mut iter, "path")?);
            }
            "--filter" | "-f" => {
                options.filter = Some(take_value(&mut iter, "filter")?);
                given.push("--filter");
            }
            "--table" => {
                options.table = true;
                given.push("--table");
            }
            "--json" => {
                options.json = true;
                given.push("--json");
            }
            "--" => {
                positional.extend(iter.by_ref().map(str::to_string));
            }
            s if s.starts_with("--") => return Err(SshcError::UnknownOption(s.to_string())),
            s => positional.push(s.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next() {
        Some(name) => CommandKind::from_name(&name).ok_or(SshcError::UnknownCommand(name))?,
        None => CommandKind::List,
    };

    let accepted = command.spec().options;
    if let Some(bad) = given.iter().find(|o| !accepted.contains(*o)) {
        return Err(SshcError::UnknownOption(bad.to_string()));
    }

    Ok(Invocation { command, args: positional.collect(), options })
}

fn take_value<'a>(iter: &mut impl Iterator<Item = &'a str>, name: &'static str) -> Result<String, SshcError> {
    iter.next()
        .map(str::to_string)
        .ok_or_else(|| SshcError::InsufficientArguments { names: vec![name] })
}

/// Writes the command overview.
pub fn write_usage(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Commands:")?;
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    for cmd in COMMANDS {
        writeln!(out, "{:<width$} | {}", cmd.usage, cmd.summary)?;
    }
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "--config <path>   ssh config to edit (default ~/.ssh/config, or $SSHC_CONFIG)")?;
    Ok(())
}
