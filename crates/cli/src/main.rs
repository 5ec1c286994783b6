//! Tally command-line binary.
//!
//! Supplies a catalog (a JSON file or a generated shirt sample), runs one query through the search
//! service and prints the report as JSON on stdout. Logs go to stderr.

use anyhow::Context;
use clap::Parser;
use tally_catalog::{Catalog, SampleBuilder};
use tally_service::{CancellationToken, SearchService, ServiceConfig};

mod catalog_file;
mod cli;

use catalog_file::DomainEntry;
use cli::{CatalogArgs, Cli, Command, DEFAULT_SAMPLE, SearchArgs};

/// Default filter under `-v`: debug for every tally crate, info elsewhere.
const VERBOSE_FILTER: &str = "tally=debug,tally_catalog=debug,tally_engine=debug,tally_service=debug,info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Search(args) => search(args).await,
		Command::Domains(source) => domains(&source),
	}
}

async fn search(args: SearchArgs) -> anyhow::Result<()> {
	let mut config = match &args.config {
		Some(path) => ServiceConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => ServiceConfig::default(),
	};
	if let Some(engine) = args.engine {
		config.engine = engine;
	}

	let catalog = load_catalog(&args.source)?;
	let service = SearchService::from_catalog(catalog, &config);
	let query = args.query();
	tracing::debug!(?query, "running search");

	let results = service.search(query, &CancellationToken::new()).await?;
	print_json(&results.report(args.limit))
}

fn domains(source: &CatalogArgs) -> anyhow::Result<()> {
	let catalog = load_catalog(source)?;
	let domains: Vec<DomainEntry> = catalog.schema().domains().iter().map(DomainEntry::from).collect();
	print_json(&domains)
}

fn load_catalog(source: &CatalogArgs) -> anyhow::Result<Catalog> {
	if let Some(path) = &source.catalog {
		return catalog_file::load(path);
	}
	let count = source.sample.unwrap_or(DEFAULT_SAMPLE);
	let mut builder = SampleBuilder::new(count);
	if let Some(seed) = source.seed {
		builder = builder.seed(seed);
	}
	let catalog = builder.build().context("generating sample catalog")?;
	tracing::info!(items = catalog.len(), "sample catalog generated");
	Ok(catalog)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
	let json = serde_json::to_string_pretty(value)?;
	println!("{json}");
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new(VERBOSE_FILTER)
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}
