use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use nms_core::CoreError;

/// Columns between two tab stops.
const TAB_WIDTH: usize = 8;

/// Read the text to reveal from `path`, or the whole of stdin.
///
/// # Errors
/// [`CoreError::FileNotFound`] for a missing file, or any read failure.
pub fn read_lines(path: Option<&Path>) -> Result<Vec<String>> {
    let bytes = match path {
        Some(path) => {
            if !path.exists() {
                return Err(CoreError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("cannot read stdin")?;
            bytes
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        log::warn!("input is not valid UTF-8, invalid bytes shown as U+FFFD");
    }
    let lines = normalize_lines(&text);
    log::info!("{} lines loaded", lines.len());
    Ok(lines)
}

/// Split `text` into display lines.
///
/// Tabs expand to the next tab stop. ANSI CSI sequences (`ESC [ … m`) and
/// other control characters (bells, carriage returns) are dropped. A trailing newline does
/// not add an empty last line.
#[must_use]
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines().map(expand_line).collect()
}

fn expand_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0usize;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' if chars.peek() == Some(&'[') => {
                // Parameters and intermediates, up to the final byte.
                chars.next();
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            '\t' => {
                let stop = (col / TAB_WIDTH + 1) * TAB_WIDTH;
                while col < stop {
                    out.push(' ');
                    col += 1;
                }
            }
            _ if ch.is_control() => {}
            _ => {
                out.push(ch);
                col += 1;
            }
        }
    }
    out
}
