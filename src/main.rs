use anyhow::{Context, Result};
use bibtex_publist::{generate_publication_list, Config, OutputFormat};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate a publication list from a BibTeX file
#[derive(Parser, Debug)]
#[command(name = "bibtex-publist", version, about)]
struct Cli {
    /// BibTeX file to read
    #[arg(required_unless_present = "config")]
    source: Option<PathBuf>,

    /// Output file [default: publication_list.html or .md]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only include records tagged with this keyword (repeatable)
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Output format: html or markdown
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// JSON configuration file; command-line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write script.js next to the output
    #[arg(long)]
    emit_script: bool,

    /// Keep entries with non-standard types such as @online
    #[arg(long)]
    all_types: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => Config::new(PathBuf::new()),
        };

        if let Some(source) = self.source {
            config.source_path = source;
        }
        if let Some(output) = self.output {
            config.output_path = Some(output);
        }
        if !self.keywords.is_empty() {
            config.keywords = Some(self.keywords);
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.emit_script |= self.emit_script;
        config.include_nonstandard_types |= self.all_types;

        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibtex_publist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config()?;
    debug!(?config, "resolved configuration");

    let report = generate_publication_list(&config).with_context(|| {
        format!(
            "generating publication list from {}",
            config.source_path.display()
        )
    })?;

    println!(
        "Publication list has been generated: {}",
        report.output_path.display()
    );
    Ok(())
}
