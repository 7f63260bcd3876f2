use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use swagger_resolver::config::{load_options, ResolverOptions};
use swagger_resolver::errors::{ResolverError, Result};
use swagger_resolver::resolution::SwaggerResolver;
use swagger_resolver::types::{AuthorizationValue, Document};

/// Inline remote $ref definitions into a Swagger document.
#[derive(Parser)]
#[command(
    name = "swagger-resolver",
    about = "Inline remote $ref definitions into a Swagger document"
)]
struct Cli {
    /// Swagger document to resolve (JSON or YAML)
    input: PathBuf,
    /// Write the resolved document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Resolver options file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Header sent with every remote fetch, as NAME=VALUE
    #[arg(long = "header", value_name = "NAME=VALUE")]
    headers: Vec<String>,
    /// Query parameter added to every remote fetch, as NAME=VALUE
    #[arg(long = "query", value_name = "NAME=VALUE")]
    queries: Vec<String>,
    /// Pretty-print the resolved document
    #[arg(short, long)]
    pretty: bool,
    /// Print the per-reference report as JSON on stderr
    #[arg(long)]
    report_json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = match &cli.config {
        Some(path) => load_options(path)?,
        None => ResolverOptions::default(),
    };

    let mut auths = Vec::with_capacity(cli.headers.len() + cli.queries.len());
    for raw in &cli.headers {
        let (name, value) = split_pair(raw)?;
        auths.push(AuthorizationValue::header(name, value));
    }
    for raw in &cli.queries {
        let (name, value) = split_pair(raw)?;
        auths.push(AuthorizationValue::query(name, value));
    }

    let contents = fs::read_to_string(&cli.input)?;
    let mut doc = Document::parse(&contents)?;

    let mut resolver = SwaggerResolver::new(options);
    let report = resolver.resolve(&mut doc, &auths);

    if cli.report_json {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in report.failures() {
            eprintln!(
                "unresolved: {} ({}): {}",
                outcome.task.site, outcome.task.locator, outcome.status
            );
        }
        if report.total > 0 {
            eprintln!(
                "Resolved {} of {} references",
                report.resolved_count, report.total
            );
        }
    }

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        doc.to_json()?
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Splits a `NAME=VALUE` command-line pair.
fn split_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(ResolverError::Config {
            message: format!("expected NAME=VALUE, got '{}'", raw),
        }),
    }
}
