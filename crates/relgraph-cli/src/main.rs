//! relgraph CLI - Command-line interface
//!
//! Usage:
//!   relgraph run [PATH] [--output FILE] [--format html|svg|png] [--json] [--no-visualize]
//!   relgraph text PATH
//!   relgraph config

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use relgraph_core::{AppConfig, Extraction, LoggingConfig, OutputFormat};
use relgraph_extractor::ExtractionPipeline;
use relgraph_graph::Visualizer;
use relgraph_nlp::{LanguageModel, RuleBasedModel};
use relgraph_parser::{LayoutOptions, ParserRegistry};

#[derive(Parser)]
#[command(name = "relgraph")]
#[command(about = "Extract entity relationships from documents and draw them as a graph")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML); environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entities and relationships, then render the graph
    Run {
        /// Document to process (defaults to the configured input)
        path: Option<PathBuf>,

        /// Where to write the graph
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Graph format, inferred from the output extension when omitted
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Print the extraction as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Skip rendering the graph
        #[arg(long)]
        no_visualize: bool,
    },
    /// Print the flattened document text with table and header markers
    Text {
        /// Document to flatten
        path: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Run {
            path,
            output,
            format,
            json,
            no_visualize,
        } => {
            let path = path.unwrap_or_else(|| config.input.pdf_path.clone());
            let extraction = extract(&config, &path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                print_report(&extraction);
            }

            if !no_visualize {
                let mut visualizer = Visualizer::new(config.visualization.clone());
                if let Some(output) = output {
                    visualizer = visualizer.with_output(output);
                }
                if let Some(format) = format {
                    visualizer = visualizer.with_format(format);
                }
                let written = visualizer
                    .render(&extraction.relationships)
                    .context("failed to render relationship graph")?;
                info!(path = %written.display(), "Relationship graph saved");
            }
        }
        Commands::Text { path } => {
            let text = flatten(&config, &path)?;
            println!("{text}");
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

// ============================================================================
// Setup
// ============================================================================

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level {:?}", config.level))?;

    // Logs go to stderr so that stdout carries only the report
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn layout_options(config: &AppConfig) -> LayoutOptions {
    LayoutOptions {
        extract_tables: config.parser.extract_tables,
        mark_headers: config.parser.mark_headers,
        column_gap: config.parser.column_gap,
        table_marker: config.extraction.table_marker.clone(),
        header_marker: config.extraction.header_marker.clone(),
    }
}

// ============================================================================
// Pipeline
// ============================================================================

fn flatten(config: &AppConfig, path: &Path) -> anyhow::Result<String> {
    let registry = ParserRegistry::with_layout(layout_options(config));
    let document = registry
        .parse(path)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    info!(
        path = %path.display(),
        pages = document.pages.len(),
        tables = document.tables().count(),
        "Document parsed"
    );
    Ok(document.flat_text())
}

fn extract(config: &AppConfig, path: &Path) -> anyhow::Result<Extraction> {
    let text = flatten(config, path)?;

    let model: Arc<dyn LanguageModel> = Arc::new(
        RuleBasedModel::from_config(&config.nlp).context("failed to load language model")?,
    );
    let pipeline = ExtractionPipeline::new(model, &config.extraction)
        .context("invalid extraction configuration")?;

    Ok(pipeline.run(&text)?)
}

fn print_report(extraction: &Extraction) {
    println!("\n### FINAL Extracted Entities ###");
    println!("{}", extraction.entity_listing());

    println!("\n### FINAL Improved Relationships ###");
    for rel in &extraction.relationships {
        println!("{rel}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use relgraph_core::Relationship;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "relgraph", "run", "report.pdf", "--output", "out.svg", "--format", "svg", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                path,
                output,
                format,
                json,
                no_visualize,
            } => {
                assert_eq!(path, Some(PathBuf::from("report.pdf")));
                assert_eq!(output, Some(PathBuf::from("out.svg")));
                assert_eq!(format, Some(OutputFormat::Svg));
                assert!(json);
                assert!(!no_visualize);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["relgraph", "run", "--format", "gif"]).is_err());
    }

    #[test]
    fn test_layout_uses_configured_markers() {
        let mut config = AppConfig::default();
        config.extraction.table_marker = "[TBL]".to_string();
        config.parser.column_gap = 3;
        let options = layout_options(&config);
        assert_eq!(options.table_marker, "[TBL]");
        assert_eq!(options.column_gap, 3);
    }

    #[test]
    fn test_extract_from_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "UNMIK discusses the mandate.").unwrap();

        let extraction = extract(&AppConfig::default(), file.path()).unwrap();
        assert!(extraction.entities.contains(&"UNMIK".to_string()));
        assert!(extraction
            .relationships
            .contains(&Relationship::new("UNMIK", "discuss", "mandate")));
    }

    #[test]
    fn test_missing_input_reports_path() {
        let err = extract(&AppConfig::default(), Path::new("/nonexistent/YOUR_PDF_HERE.pdf"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("YOUR_PDF_HERE.pdf"));
    }
}
