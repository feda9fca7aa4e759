use std::io::Write;
use prettytable::{row, Table};
use crate::cli::Invocation;
use crate::commands::{Context, Outcome};
use crate::error::SshcError;
use crate::filter::filter_hosts;
use crate::models::HostRecord;

/// One line per host: `alias [ user@hostname ]:port (key: file)`.
pub fn summary_line(h: &HostRecord) -> String {
    let mut line = format!("{:<15}", h.host().unwrap_or_default());
    if let (Some(hostname), Some(user)) = (h.get("HostName"), h.get("User")) {
        line.push_str(&format!(" [ {user}@{hostname} ]"));
    }
    if let Some(port) = h.get("Port") {
        line.push_str(&format!(":{port}"));
    }
    if let Some(key) = h.get("IdentityFile") {
        line.push_str(&format!(" (key: {key})"));
    }
    line
}

pub fn list(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Outcome, SshcError> {
    let rows: Vec<&HostRecord> = match &inv.options.filter {
        Some(f) => filter_hosts(ctx.store.hosts(), f),
        None => ctx.store.hosts().iter().collect(),
    };
    if rows.is_empty() && inv.options.filter.is_some() && !inv.options.json {
        writeln!(ctx.out, "No hosts match your filter.")?;
        return Ok(Outcome::Unchanged);
    }

    if inv.options.json {
        writeln!(ctx.out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else if inv.options.table {
        let mut table = Table::new();
        table.add_row(row!["Host", "User", "HostName", "Port", "IdentityFile"]);
        for h in rows {
            let cell = |k: &str| h.get(k).unwrap_or_default().to_string();
            table.add_row(row![cell("Host"), cell("User"), cell("HostName"), cell("Port"), cell("IdentityFile")]);
        }
        table.print(&mut *ctx.out)?;
    } else {
        for h in rows {
            writeln!(ctx.out, "{}", summary_line(h))?;
        }
    }
    Ok(Outcome::Unchanged)
}

pub fn get(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Outcome, SshcError> {
    let host = inv.arg(0).unwrap_or_default();
    ctx.require_host(host)?;
    let Some(record) = ctx.store.get(host) else {
        return Ok(Outcome::Unchanged);
    };

    if inv.options.json {
        writeln!(ctx.out, "{}", serde_json::to_string_pretty(record)?)?;
    } else {
        for (k, v) in record.fields() {
            writeln!(ctx.out, "{k}: {v}")?;
        }
    }
    Ok(Outcome::Unchanged)
}
