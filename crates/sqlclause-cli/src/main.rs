//! sqlclause CLI
//!
//! Prints the clause dictionary of a SQL statement.

mod printer;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use sqlclause_core::validate::validators;
use sqlclause_core::{build_clause_dict, ParserConfig, Query};

use crate::printer::render_clause_dict;

const RULE: &str = "----------------------------------------";

/// Break a SQL statement into its clauses.
#[derive(Parser)]
#[command(name = "sqlclause")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The SQL statement, with tokens separated by spaces.
    #[arg(short, long, env = "SQLCLAUSE_QUERY")]
    query: String,

    /// Run the validators before building the dictionary.
    #[arg(long, visible_alias = "vq")]
    validate_query: bool,

    /// Print the dictionary as JSON.
    #[arg(short, long)]
    raw_output: bool,

    /// Extra multi-word keyword to merge, e.g. "ORDER BY".
    #[arg(long = "merge-keyword", value_name = "PHRASE")]
    merge_keywords: Vec<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        self.merge_keywords
            .iter()
            .fold(ParserConfig::default(), |config, phrase| {
                config.merge_phrase(phrase)
            })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.parser_config();
    let query = Query::parse_with(&cli.query, &config)?;
    debug!(elements = query.len(), "parsed query");

    if cli.validate_query {
        println!("{RULE}");
        println!("VALIDATION");
        println!("{RULE}");
        for validator in validators() {
            validator.check(&query)?;
            println!("{} successfully validated the query", validator.name);
        }
        println!("{RULE}");
    }

    let dict = build_clause_dict(&query);
    if cli.raw_output {
        println!("{}", serde_json::to_string(&dict)?);
    } else {
        print!("{}", render_clause_dict(&dict));
    }

    Ok(())
}
