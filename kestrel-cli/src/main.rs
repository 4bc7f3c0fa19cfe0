//! Kestrel CLI
//!
//! Parse one property value or a declaration block and print the longhands
//! it expands into.

use clap::{Parser, ValueEnum};
use kestrel_css::parser::{LocalContext, TokenStream};
use kestrel_css::{
    CSSParserMode, CSSPropertyID, CSSPropertyParser, CSSValue, MutablePropertyValueSet,
    ParseError, ParserContext, PropertyValue, parse_value_text, resolve_property,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use strum::IntoEnumIterator;

/// Kestrel: inspect how CSS values parse and expand
#[derive(Parser, Debug)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Expand a shorthand
    kestrel margin '1px 2px'

    # Mark the result important and print JSON
    kestrel --important --json background 'url(a.png) no-repeat, red'

    # Parse a declaration block
    kestrel --declarations 'color: red !important; flex: 1'

    # Parse with quirks-mode unitless lengths
    kestrel --mode quirks width 10
"#)]
struct Cli {
    /// Property name, canonical or `-webkit-` alias
    #[arg(value_name = "PROPERTY", required_unless_present_any = ["declarations", "list_properties"])]
    property: Option<String>,

    /// Value text to parse
    #[arg(value_name = "VALUE", required_unless_present_any = ["declarations", "list_properties"])]
    value: Option<String>,

    /// Mark every resulting longhand `!important`
    #[arg(long)]
    important: bool,

    /// Parsing mode of the stylesheet the value comes from
    #[arg(long, value_enum, default_value_t = Mode::Standard)]
    mode: Mode,

    /// Parse a `;`-separated declaration list instead of one value
    #[arg(long, value_name = "CSS", conflicts_with_all = ["property", "value"])]
    declarations: Option<String>,

    /// Print the supported properties and exit
    #[arg(long)]
    list_properties: bool,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,
}

/// Command-line spelling of [`CSSParserMode`].
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Standard,
    Quirks,
    Ua,
}

impl From<Mode> for CSSParserMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Standard => Self::Standard,
            Mode::Quirks => Self::Quirks,
            Mode::Ua => Self::UASheet,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    entries: Vec<&'a PropertyValue>,
    css_text: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_properties {
        print_properties();
        return Ok(());
    }

    let mut set = MutablePropertyValueSet::new(cli.mode.into());
    if let Some(ref text) = cli.declarations {
        if !set.parse_declaration_list(text) && !text.trim().is_empty() {
            anyhow::bail!("no declaration in '{}' parsed", text.trim());
        }
    } else if let (Some(name), Some(value)) = (&cli.property, &cli.value) {
        for entry in parse_property(name, value, cli.important, set.context())? {
            let _ = set.set_property(entry);
        }
    } else {
        anyhow::bail!("expected <PROPERTY> <VALUE>, --declarations, or --list-properties");
    }

    if cli.json {
        let report = Report {
            entries: set.iter().collect(),
            css_text: set.as_text(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &set {
            print_entry(entry);
        }
    }
    Ok(())
}

/// Parse `value` for the property spelled `name`, honouring `-webkit-`
/// alias grammar.
fn parse_property(
    name: &str,
    value: &str,
    important: bool,
    context: &ParserContext,
) -> anyhow::Result<Vec<PropertyValue>> {
    let Some((id, use_alias_parsing)) = resolve_property(name) else {
        anyhow::bail!(ParseError::UnknownProperty(name.to_string()));
    };
    if !use_alias_parsing {
        return Ok(parse_value_text(id, value, important, context)?);
    }

    let local = LocalContext {
        use_alias_parsing,
        ..LocalContext::default()
    };
    let mut stream = TokenStream::new(value);
    let mut entries = Vec::new();
    if !CSSPropertyParser::parse_value_with(id, local, false, &mut stream, context, &mut entries) {
        anyhow::bail!(ParseError::InvalidValue {
            property: id,
            value: value.trim().to_string(),
        });
    }
    for entry in &mut entries {
        entry.important = important;
    }
    Ok(entries)
}

fn print_entry(entry: &PropertyValue) {
    let value = match &*entry.value {
        CSSValue::PendingSubstitution { text, .. } => format!("{text} {}", "(pending var())".dimmed()),
        value => value.css_text(),
    };
    print!("{}: {value}", entry.name().cyan());
    if entry.important {
        print!(" {}", "!important".red().bold());
    }
    if entry.implicit {
        print!(" {}", "(implicit)".dimmed());
    }
    println!();
}

fn print_properties() {
    for id in CSSPropertyID::iter() {
        if id.is_shorthand() {
            let longhands: Vec<&str> = id.longhands().iter().copied().map(CSSPropertyID::name).collect();
            println!("{} {} {}", id.name().cyan(), "->".dimmed(), longhands.join(", "));
        } else if id.has_webkit_alias() {
            println!("{} {}", id.name(), format!("(-webkit-{id})").dimmed());
        } else {
            println!("{}", id.name());
        }
    }
}
