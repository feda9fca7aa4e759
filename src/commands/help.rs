use crate::cli::{write_usage, Invocation};
use crate::commands::{Context, Outcome};
use crate::error::SshcError;

pub fn help(ctx: &mut Context<'_>, _inv: &Invocation) -> Result<Outcome, SshcError> {
    write_usage(ctx.out)?;
    Ok(Outcome::Unchanged)
}
