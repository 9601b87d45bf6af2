//! Formatting of command arguments for logging.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serenity::all::{ResolvedOption, ResolvedValue};

/// Text arguments longer than this are shortened in logs.
const MAX_LOGGED_TEXT_LEN: usize = 100;

/// Implements [`Display`] to format resolved command arguments.
#[must_use]
pub enum DisplayResolvedArgs<'a> {
    /// Uses resolved options from a slash command.
    Options(&'a [ResolvedOption<'a>]),
    /// Uses the input string from a message command.
    String(&'a str),
}

impl Display for DisplayResolvedArgs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DisplayResolvedArgs::Options(o) => fmt_resolved_options(o, f),
            DisplayResolvedArgs::String(s) => f.write_str(&utils::text::truncate(*s, MAX_LOGGED_TEXT_LEN)),
        }
    }
}

fn fmt_resolved_options(options: &[ResolvedOption<'_>], f: &mut Formatter<'_>) -> FmtResult {
    for o in options {
        f.write_str(o.name)?;
        f.write_str(": ")?;
        fmt_resolved_value(&o.value, f)?;
        f.write_str(" ")?;
    }

    Ok(())
}

fn fmt_resolved_value(value: &ResolvedValue<'_>, f: &mut Formatter<'_>) -> FmtResult {
    match value {
        ResolvedValue::Boolean(v) => v.fmt(f),
        ResolvedValue::Integer(v) => v.fmt(f),
        ResolvedValue::Number(v) => v.fmt(f),
        ResolvedValue::String(v) => write!(f, "{:?}", utils::text::truncate(*v, MAX_LOGGED_TEXT_LEN)),
        ResolvedValue::SubCommand(o) | ResolvedValue::SubCommandGroup(o) => fmt_resolved_options(o, f),
        _ => f.write_str("<unknown>"),
    }
}
