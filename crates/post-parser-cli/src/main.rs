use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use post_parser_config::Config;
use post_parser_engine::parsing::snapshot;
use post_parser_engine::{AttributeScan, Document, ParseOptions, encode, parse_with};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "post-parser", version, about = "Parse block-annotated posts")]
struct Cli {
    /// Post to parse; stdin when absent or `-`
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Json)]
    emit: Emit,

    /// Deepest block nesting accepted (overrides the config file)
    #[arg(long)]
    max_depth: Option<usize>,

    /// How attribute objects are delimited (overrides the config file)
    #[arg(long, value_enum)]
    attribute_scan: Option<AttributeScan>,

    /// Config file to use instead of ~/.config/post-parser/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The tree as JSON
    Json,
    /// An indented outline, one node per line
    Outline,
    /// Rust debug formatting of the tree
    Debug,
    /// The binary wire format
    Wire,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Config file settings with command-line overrides applied.
    fn parse_options(&self) -> Result<ParseOptions> {
        let config = match &self.config {
            Some(path) => {
                let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
                Config::load_from_path(&path)?
                    .with_context(|| format!("config file {} not found", path.display()))?
            }
            None => Config::load()?.unwrap_or_default(),
        };

        let mut options = config.parse_options();
        if let Some(max_depth) = self.max_depth {
            options = options.with_max_depth(max_depth);
        }
        if let Some(scan) = self.attribute_scan {
            options = options.with_attribute_scan(scan);
        }
        Ok(options)
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn render(document: &Document<'_>, emit: Emit) -> Result<Vec<u8>> {
    let bytes = match emit {
        Emit::Json => {
            let mut json = serde_json::to_vec_pretty(document)?;
            json.push(b'\n');
            json
        }
        Emit::Outline => snapshot::outline(document).into_bytes(),
        Emit::Debug => format!("{document:#?}\n").into_bytes(),
        Emit::Wire => encode(document)?,
    };
    Ok(bytes)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let options = cli.parse_options()?;
    log::info!("parse options: {options:?}");

    let text = read_input(cli.input.as_deref())?;
    let document = parse_with(&text, &options)?;
    let output = render(&document, cli.emit)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
