//! Interactive attribute behavior prompt
//!
//! Attributes given on the command line are taken as is; the operator is
//! asked for every other attribute the playlist captures.

use dedupx_core::{Error, Result};
use dedupx_similarity::{AttributeBehavior, CompareMode};
use std::io::{BufRead, Write};

/// Resolve a comparison mode for every attribute.
///
/// Invalid answers are re-prompted; end of input is an error.
pub fn prompt_behavior<R, W>(
    attrs: &[&str],
    preset: &AttributeBehavior,
    input: &mut R,
    output: &mut W,
) -> Result<AttributeBehavior>
where
    R: BufRead,
    W: Write,
{
    let mut behavior = AttributeBehavior::new();

    for attr in attrs {
        if let Some(mode) = preset.mode(attr) {
            behavior.set(*attr, mode);
            continue;
        }

        let mode = loop {
            write!(output, "{} [s]trong / [g]rouped / [i]gnore: ", attr)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(Error::InvalidConfig(format!(
                    "input closed before a mode was chosen for '{}'",
                    attr
                )));
            }

            match line.parse::<CompareMode>() {
                Ok(mode) => break mode,
                Err(_) => writeln!(output, "unknown mode '{}'", line.trim())?,
            }
        };
        behavior.set(*attr, mode);
    }

    tracing::info!(
        strong = behavior.count(CompareMode::Strong),
        grouped = behavior.count(CompareMode::Grouped),
        ignore = behavior.count(CompareMode::Ignore),
        "attribute behavior resolved"
    );

    Ok(behavior)
}
