//! CLI for rendering JSON trees and ANSI colored text as HTML.
//!
//! ## Usage
//!
//! ```bash
//! # Render a list of list items
//! echo '["a", "b"]' | bdom render -t li -t ul
//!
//! # Render a table from a file, one line per element
//! bdom render rows.json -t td -t tr -t table --mode nested
//!
//! # Attributes apply to the outermost tag
//! echo '["x"]' | bdom render -t p -a class=note -a hidden -a draggable=!
//!
//! # Convert colored terminal output
//! cargo test --color always 2>&1 | bdom ansi --tag pre
//!
//! # Export as JsonML
//! echo '["a", "b"]' | bdom jsonml -t ul
//! ```

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use biscuit_dom::{
    AttrValue, Attributes, Node, RenderMode, Renderer, ansi, attributes, escape, to_jsonml,
};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Render nested lists and ANSI colored text as HTML
#[derive(Parser, Debug)]
#[command(name = "bdom", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON tree of strings, arrays and nulls as HTML
    ///
    /// The tag path is given innermost first: `-t td -t tr -t table`
    /// renders an array of rows as a table.
    Render {
        #[command(flatten)]
        element: ElementArgs,

        /// Join strategy: compact, nested or pre
        #[arg(short, long, default_value_t = RenderMode::Compact)]
        mode: RenderMode,

        /// Content appended once after the rendered markup
        #[arg(long, value_name = "HTML")]
        mounted: Option<String>,

        /// Print the markup only, without mounted content
        #[arg(long)]
        no_mounted: bool,

        /// JSON input file (reads stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Convert ANSI color codes into <span class="..."> markup
    Ansi {
        /// Text to convert (reads stdin if omitted)
        #[arg(value_name = "TEXT", conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Wrap the result in this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Export a JSON tree as a JsonML element
    Jsonml {
        /// Element tag name
        #[arg(short, long)]
        tag: String,

        /// Attribute: key=value, key (true) or key=! (false)
        #[arg(short, long = "attr", value_name = "KEY[=VALUE]", value_parser = parse_attr)]
        attrs: Vec<(String, AttrValue)>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// JSON input file (reads stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ElementArgs {
    /// Tag to apply, innermost first (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Attribute for the outermost tag: key=value, key (true) or key=! (false)
    #[arg(short, long = "attr", value_name = "KEY[=VALUE]", value_parser = parse_attr)]
    attrs: Vec<(String, AttrValue)>,
}

const AFTER_HELP: &str = "\
EXAMPLES:
  echo '[\"a\", \"b\"]' | bdom render -t li -t ul      # <ul><li>a</li><li>b</li></ul>
  bdom render rows.json -t td -t tr -t table -m nested
  bdom ansi \"$(ls --color=always)\" --tag pre
  echo '[\"a\"]' | bdom jsonml -t p -a class=x
";

/// Parses `key=value`, `key` (true) or `key=!` (false).
fn parse_attr(s: &str) -> Result<(String, AttrValue), String> {
    let (key, value) = match s.split_once('=') {
        None => (s, AttrValue::Flag(true)),
        Some((key, "!")) => (key, AttrValue::Flag(false)),
        Some((key, value)) => (key, AttrValue::from(value)),
    };

    if key.is_empty() {
        return Err(format!("attribute name missing in '{s}'"));
    }
    Ok((key.to_string(), value))
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): no subscriber
/// - 1 (-v): INFO
/// - 2 (-vv): DEBUG (render entry points, unknown ANSI codes)
/// - 3 (-vvv): TRACE (every list level)
/// - 4+ (-vvvv): TRACE with file/line numbers
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "info,bdom=info,biscuit_dom=info".to_string(),
            2 => "info,bdom=debug,biscuit_dom=debug".to_string(),
            _ => "debug,bdom=trace,biscuit_dom=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render {
            element,
            mode,
            mounted,
            no_mounted,
            input,
        } => {
            let node = parse_tree(&read_input(input.as_deref())?)?;
            let tags: Vec<&str> = element.tags.iter().map(String::as_str).collect();
            let attributes: Attributes = element.attrs.into_iter().collect();
            info!(%mode, ?tags, "rendering tree");

            let rendered = Renderer::new(mode)
                .render_tree(&node, &tags, &attributes, mounted.as_deref())
                .wrap_err("Failed to render tree")?;

            if no_mounted {
                println!("{}", rendered.markup);
            } else {
                println!("{}", rendered.into_document());
            }
        }
        Command::Ansi { text, file, tag } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_file(&path)?,
                (None, None) => read_stdin()?,
            };
            println!("{}", convert_ansi(text.trim_end_matches('\n'), tag.as_deref()));
        }
        Command::Jsonml {
            tag,
            attrs,
            pretty,
            input,
        } => {
            let node = parse_tree(&read_input(input.as_deref())?)?;
            let attributes: Option<Attributes> =
                (!attrs.is_empty()).then(|| attrs.into_iter().collect());
            let exported = to_jsonml(&node, &tag, attributes.as_ref());

            let json = if pretty {
                serde_json::to_string_pretty(&exported)?
            } else {
                serde_json::to_string(&exported)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

/// Escapes terminal output and converts its color codes, optionally
/// wrapping the result in `tag`.
fn convert_ansi(text: &str, tag: Option<&str>) -> String {
    let html = ansi::convert(&escape::encode(text));
    match tag {
        Some(tag) => attributes::format(tag, &Attributes::new()).wrap(&html),
        None => html,
    }
}

fn parse_tree(json: &str) -> Result<Node> {
    let value: serde_json::Value =
        serde_json::from_str(json).wrap_err("Input is not valid JSON")?;
    Ok(Node::from(value))
}

/// Reads from `input`, or stdin when it is omitted or "-".
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => read_file(path),
        Some(_) => read_stdin(),
        None if io::stdin().is_terminal() => Err(eyre!(
            "No input provided. Pass a file path or pipe JSON to stdin."
        )),
        None => read_stdin(),
    }
}

fn read_file(path: &Path) -> Result<String> {
    debug!(?path, "reading input file");
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {:?}", path))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .wrap_err("Failed to read from stdin")?;
    debug!(bytes = content.len(), "read stdin");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attr_forms() {
        assert_eq!(
            parse_attr("class=note").unwrap(),
            ("class".to_string(), AttrValue::Text("note".into()))
        );
        assert_eq!(
            parse_attr("hidden").unwrap(),
            ("hidden".to_string(), AttrValue::Flag(true))
        );
        assert_eq!(
            parse_attr("draggable=!").unwrap(),
            ("draggable".to_string(), AttrValue::Flag(false))
        );
        assert_eq!(
            parse_attr("title=").unwrap(),
            ("title".to_string(), AttrValue::Text(String::new()))
        );
    }

    #[test]
    fn test_parse_attr_requires_name() {
        assert!(parse_attr("=x").is_err());
        assert!(parse_attr("").is_err());
    }

    #[test]
    fn test_convert_ansi_escapes_first() {
        assert_eq!(
            convert_ansi("\x1b[31ma<b\x1b[0m", None),
            r#"<span class="red">a&lt;b</span>"#
        );
        assert_eq!(
            convert_ansi("\x1b[1mok\x1b[0m", Some("pre")),
            r#"<pre><span class="bold">ok</span></pre>"#
        );
    }
}
