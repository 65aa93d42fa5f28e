//! ANSI SGR escape sequences to HTML `<span>` markup.
//!
//! The converter scans left to right and, at each escape character, tries
//! two anchored matches in order:
//!
//! 1. `ESC [ 0? m` (reset) becomes `</span>`
//! 2. `ESC [ 0? <digits> m` becomes `<span class="NAME">`, with `NAME` looked
//!    up in [`ANSI_CLASSES`]
//!
//! Anything else is copied through unchanged, one character at a time.
//!
//! No stack of open spans is kept. Every reset closes exactly one span, so
//! `"\x1b[31m\x1b[1mx\x1b[0m"` yields two opening tags and a single closing
//! one. Input is expected to pair every colour code with a reset. Codes
//! missing from the table produce `class=""`, and multi-parameter sequences
//! such as `ESC [ 1 ; 31 m` are not recognised and pass through verbatim.
//!
//! ## Examples
//!
//! ```
//! use biscuit_dom::ansi::convert;
//!
//! assert_eq!(
//!     convert("\x1b[31mred\x1b[0m"),
//!     r#"<span class="red">red</span>"#
//! );
//! ```

use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

const ESC: char = '\x1b';

/// SGR code to CSS class name.
pub const ANSI_CLASSES: [(&str, &str); 18] = [
    ("1", "bold"),
    ("4", "underline"),
    ("30", "black"),
    ("31", "red"),
    ("32", "green"),
    ("33", "yellow"),
    ("34", "blue"),
    ("35", "magenta"),
    ("36", "cyan"),
    ("37", "white"),
    ("40", "bg-black"),
    ("41", "bg-red"),
    ("42", "bg-green"),
    ("43", "bg-yellow"),
    ("44", "bg-blue"),
    ("45", "bg-magenta"),
    ("46", "bg-cyan"),
    ("47", "bg-white"),
];

lazy_static! {
    static ref RESET: Regex = Regex::new(r"^\x1b\[0?m").unwrap();
    static ref SGR: Regex = Regex::new(r"^\x1b\[0?([0-9]+)m").unwrap();
}

/// Looks up the class name for an SGR code (`"31"` -> `"red"`).
pub fn class_for(code: &str) -> Option<&'static str> {
    ANSI_CLASSES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, class)| *class)
}

/// Rewrites the SGR sequences in `text` as `<span>` markup.
///
/// Total: every input produces output and nothing is rejected.
pub fn convert(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        if !rest.starts_with(ESC) {
            let next = rest.find(ESC).unwrap_or(rest.len());
            out.push_str(&rest[..next]);
            rest = &rest[next..];
            continue;
        }

        if let Some(reset) = RESET.find(rest) {
            out.push_str("</span>");
            rest = &rest[reset.end()..];
        } else if let Some(caps) = SGR.captures(rest) {
            let code = caps.get(1).map_or("", |m| m.as_str());
            let class = class_for(code).unwrap_or_else(|| {
                debug!(code, "unknown SGR code, emitting empty class");
                ""
            });
            let _ = write!(out, "<span class=\"{class}\">");
            rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
        } else {
            // lone escape character
            out.push(ESC);
            rest = &rest[ESC.len_utf8()..];
        }
    }

    out
}
