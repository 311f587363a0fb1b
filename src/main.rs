//! sqlexpr - compile expression documents into parameterized SQL

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::info;
use sqlexpr::config::{CompilerConfig, PlaceholderStyle};
use sqlexpr::expression::NodeDocument;
use sqlexpr::mapping::{PathBinder, SchemaMapping};
use sqlexpr::render::Compiler;
use std::io::Read;
use std::path::PathBuf;

/// Compile a JSON expression document into an SQL fragment
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression document to compile (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Compiler configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entity mapping file (JSON) used to bind paths
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Placeholder style, overriding the configuration file
    #[arg(short, long, value_enum)]
    placeholder: Option<PlaceholderStyle>,

    /// Require the expression to be a boolean predicate
    #[arg(long)]
    predicate: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::default(),
    };
    if let Some(placeholder) = args.placeholder {
        config = config.with_placeholder(placeholder);
    }

    let mapping = match &args.mapping {
        Some(path) => SchemaMapping::load(path)?,
        None => SchemaMapping::default(),
    };

    let text = read_input(args.input.as_ref())?;
    let document = NodeDocument::from_json_str(&text).context("Failed to parse expression document")?;

    let mut binder = PathBinder::new(&mapping);
    let tree = document
        .bind(&mut binder)
        .context("Failed to build expression tree")?;

    let compiler = Compiler::new(config);
    let compiled = if args.predicate {
        compiler.compile_predicate(&tree)
    } else {
        compiler.compile(&tree)
    }
    .context("Failed to compile expression")?;
    info!("Referenced tables: {:?}", binder.tables());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        println!("sql:    {}", compiled.sql);
        let params: Vec<String> = compiled.params.iter().map(|p| p.to_string()).collect();
        println!("params: [{}]", params.join(", "));
        println!("type:   {}", compiled.result_type);
        println!("join:   {}", compiled.requires_join);
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
