//! Resolving the target argument.
//!
//! The single positional argument is either an inline target literal or,
//! when it names a `.txt` file, a newline-delimited target list.

use std::fs;

use anyhow::Context as _;
use plcprobe_common::network::target::Target;

/// Turns the CLI argument into the targets for this run.
///
/// Anything containing a range or mask marker is always an inline
/// literal; a `.txt` suffix selects file mode; everything else is one
/// bare target.
pub fn resolve_targets(token: &str) -> anyhow::Result<Vec<Target>> {
    if token.contains('-') || token.contains('/') {
        return Ok(vec![Target::parse(token)]);
    }

    if token.ends_with(".txt") {
        let contents =
            fs::read_to_string(token).with_context(|| format!("reading target list {token}"))?;
        return Ok(parse_lines(&contents));
    }

    Ok(vec![Target::parse(token)])
}

/// Blank lines and `#` comments are ignored.
fn parse_lines(contents: &str) -> Vec<Target> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Target::parse)
        .collect()
}
