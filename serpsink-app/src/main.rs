//! serpsink command line: stream search-engine result pages into a CSV file,
//! or print templated dork queries for a keyword.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serpsink_common::observability::{LogConfig, init_logging};
use serpsink_pipeline::{PipelineConfig, run_query};
use serpsink_search::{SerpApi, dorks};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "serpsink",
    version,
    about = "Stream search engine results into a CSV file"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Retrieve every result page for a query and append the rows to a CSV file
    Get {
        /// Search expression; may also be given via --query
        query: Option<String>,

        /// Search expression (flag form)
        #[arg(long = "query", value_name = "QUERY")]
        query_flag: Option<String>,

        /// Search engine to drive
        #[arg(long, default_value = "google")]
        engine: String,

        /// Output file path; rows are appended, never rewritten
        #[arg(long, default_value = "output.csv")]
        output: PathBuf,

        /// SerpAPI credential; normally supplied through the environment
        #[arg(long = "apikey", env = "SERP_API_KEY", hide_env_values = true)]
        api_key: String,
    },

    /// Print one templated query per dork operator for a keyword
    Generate {
        /// Keyword to combine with each operator
        keyword: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogConfig::default())?;

    match cli.command {
        Command::Get {
            query,
            query_flag,
            engine,
            output,
            api_key,
        } => {
            let query = query_flag.or(query).unwrap_or_default();
            if query.trim().is_empty() {
                bail!("search query is required; pass it as an argument or via --query");
            }
            if output.extension().and_then(|e| e.to_str()) != Some("csv") {
                tracing::warn!(
                    output = %output.display(),
                    "output extension is not .csv; records are written as CSV regardless"
                );
            }

            println!("Running query: {query}");
            println!("Using search engine: {engine}");
            println!("Results will be saved to: {}", output.display());

            let source = Arc::new(SerpApi::new(api_key, engine));
            let summary = run_query(source, query, output, PipelineConfig::default())
                .await
                .context("query failed")?;

            println!(
                "Search completed successfully ({} pages, {} records)",
                summary.pages, summary.records
            );
        }
        Command::Generate { keyword } => {
            for query in dorks::queries_for(&keyword) {
                println!("{query}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn get_fails_fast_without_credential() {
        temp_env::with_var("SERP_API_KEY", None::<&str>, || {
            assert!(Cli::try_parse_from(["serpsink", "get", "query"]).is_err());
        });
    }

    #[test]
    fn get_reads_credential_and_defaults() {
        temp_env::with_var("SERP_API_KEY", Some("k"), || {
            let cli = Cli::try_parse_from(["serpsink", "get", "leak hunt"]).unwrap();
            match cli.command {
                Command::Get {
                    query,
                    engine,
                    output,
                    api_key,
                    ..
                } => {
                    assert_eq!(query.as_deref(), Some("leak hunt"));
                    assert_eq!(engine, "google");
                    assert_eq!(output, PathBuf::from("output.csv"));
                    assert_eq!(api_key, "k");
                }
                _ => panic!("expected get subcommand"),
            }
        });
    }

    #[test]
    fn generate_takes_a_keyword() {
        let cli = Cli::try_parse_from(["serpsink", "generate", "acme"]).unwrap();
        assert!(matches!(cli.command, Command::Generate { .. }));
    }
}
