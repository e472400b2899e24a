//! Answer a single schema lookup from the command line.
//!
//! Prints the answer as compact JSON on stdout so shell scripts can pipe it
//! into other tools. Misses print `null` and still exit 0; only a broken data
//! directory or bad usage is an error.

use anyhow::{Result, bail};
use fastschema::{EnumKind, EnumValue, ItemRef, Schema};
use serde_json::{Value, json};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FASTSCHEMA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    if matches!(args.query, Query::Help) {
        print_usage();
        return Ok(());
    }

    let schema = match &args.data_dir {
        Some(dir) => Schema::open(dir)?,
        None => Schema::open_default()?,
    };

    let output = answer(&schema, &args.query)?;
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn answer(schema: &Schema, query: &Query) -> Result<Value> {
    let value = match query {
        Query::Defindex(item) => json!(schema.defindex_of(ItemRef::parse(item))),
        Query::Name(item) => json!(schema.name_of(ItemRef::parse(item))?),
        Query::Unique(item) => json!(schema.is_unique_named_item(ItemRef::parse(item))?),
        Query::Series(item) => json!(schema.series_number_of(ItemRef::parse(item))?),
        Query::Item(name) => match schema.item_of(name) {
            Some(item) => json!({
                "defindex": item.defindex,
                "name": item.name,
                "item_name": item.item_name,
                "item_class": item.item_class,
                "item_type_name": item.item_type_name,
                "proper_name": item.proper_name,
            }),
            None => Value::Null,
        },
        Query::Enum { kind, value } => match EnumValue::parse(value) {
            EnumValue::Code(_) => json!(schema.enum_name_of(*kind, value.as_str())?),
            EnumValue::Name(_) => json!(schema.code_of(*kind, value.as_str())?),
        },
        Query::Help => Value::Null,
    };
    Ok(value)
}

enum Query {
    Defindex(String),
    Name(String),
    Item(String),
    Unique(String),
    Series(String),
    Enum { kind: EnumKind, value: String },
    Help,
}

struct CliArgs {
    data_dir: Option<PathBuf>,
    query: Query,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut data_dir = None;
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let Some(dir) = args.next() else {
                        bail!("--data requires a directory");
                    };
                    data_dir = Some(PathBuf::from(dir));
                }
                "-h" | "--help" => {
                    return Ok(Self {
                        data_dir,
                        query: Query::Help,
                    });
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(command) = positional.next() else {
            bail!(usage());
        };
        let value = positional.collect::<Vec<_>>().join(" ");
        if value.is_empty() {
            bail!("{command} expects a value\n{}", usage());
        }

        let query = match command.as_str() {
            "defindex" => Query::Defindex(value),
            "name" => Query::Name(value),
            "item" => Query::Item(value),
            "unique" => Query::Unique(value),
            "series" => Query::Series(value),
            "quality" => Query::Enum { kind: EnumKind::Quality, value },
            "wear" => Query::Enum { kind: EnumKind::Wear, value },
            "killstreak" => Query::Enum { kind: EnumKind::Killstreak, value },
            "texture" => Query::Enum { kind: EnumKind::Texture, value },
            "effect" => Query::Enum { kind: EnumKind::Effect, value },
            other => bail!("Unknown command: {other}\n{}", usage()),
        };

        Ok(Self { data_dir, query })
    }
}

fn usage() -> &'static str {
    "Usage: schema-lookup [--data DIR] <command> <value...>\n\
     Commands:\n  \
     defindex <name>        defindex for an item name\n  \
     name <defindex>        display name for a defindex\n  \
     item <name>            full catalog record for a name\n  \
     unique <item>          whether the item is uniquely named\n  \
     series <item>          supply crate series number\n  \
     quality|wear|killstreak|texture|effect <name|code>\n\
     Environment:\n  \
     FASTSCHEMA_DATA_DIR    dataset directory when --data is not given\n  \
     FASTSCHEMA_LOG         log filter (default: warn)"
}

fn print_usage() {
    println!("{}", usage());
}
