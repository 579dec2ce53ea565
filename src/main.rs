//! Cppgraph CLI - translate C++ source units into program graphs

use clap::{Parser, Subcommand};
use cppgraph::Frontend;
use cppgraph::config::{self, TranslationConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "cppgraph")]
#[command(version = "0.1.0")]
#[command(about = "C++ syntax-to-graph frontend - typed program graphs for static analysis")]
#[command(long_about = r#"
Cppgraph translates C++ sources into a typed program graph, enabling:
  • Downstream dataflow and call-graph analysis
  • Canonical, comparable type handles across a unit
  • Lexically scoped name resolution with shadowing semantics

Example usage:
  cppgraph translate --path src/auth.cpp
  cppgraph translate --path src/auth.cpp --json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a source file and print the resulting graph
    Translate {
        /// Path to the C++ source file
        #[arg(short, long)]
        path: PathBuf,

        /// Print the full graph as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Disable annotation/attribute processing
        #[arg(long)]
        no_annotations: bool,

        /// Path to a cppgraph.toml (defaults to the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default cppgraph.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Translate {
            path,
            json,
            no_annotations,
            config,
        } => {
            let mut translation_config =
                config::load_config(config.as_deref())?.unwrap_or_default();
            if no_annotations {
                translation_config.process_annotations = false;
            }

            tracing::info!("Translating {}", path.display());
            let frontend = Frontend::new(translation_config);
            let unit = frontend.translate_file(&path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&unit)?);
            } else {
                println!("Translated {}", unit.path);
                println!("  declarations: {}", unit.graph.decl_count());
                println!("  statements:   {}", unit.graph.stmt_count());
                println!("  expressions:  {}", unit.graph.expr_count());
                println!("  types:        {}", unit.types.len());
                println!("  diagnostics:  {}", unit.diagnostics.len());
                for diagnostic in &unit.diagnostics {
                    tracing::warn!("{}", diagnostic);
                }
            }
        }
        Commands::Init { force } => {
            let path = config::default_config_path();
            config::write_config(&path, &TranslationConfig::default(), force)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
