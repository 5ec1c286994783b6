use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tally_engine::{EngineKind, FacetMode, Query};

/// Items generated when neither `--catalog` nor `--sample` is given.
pub const DEFAULT_SAMPLE: usize = 1_000;

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Faceted search with cross-filtered facet counts")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run one query and print matches and facet counts as JSON
	Search(SearchArgs),
	/// Print the attribute domains of a catalog as JSON
	Domains(CatalogArgs),
}

/// Where the catalog comes from.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CatalogArgs {
	/// JSON catalog file
	#[arg(long, value_name = "FILE", conflicts_with = "sample")]
	pub catalog: Option<PathBuf>,

	/// Generate a sample shirt catalog of this many items
	#[arg(long, value_name = "N")]
	pub sample: Option<usize>,

	/// Seed for the sample catalog
	#[arg(long, value_name = "SEED", conflicts_with = "catalog")]
	pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
	#[command(flatten)]
	pub source: CatalogArgs,

	/// Accepted values for one domain, e.g. `color=red,black` (repeatable)
	#[arg(long = "facet", value_name = "DOMAIN=V1,V2", value_parser = parse_facet)]
	pub facets: Vec<FacetArg>,

	/// How restricted domains are counted
	#[arg(long, default_value_t = FacetMode::Accepted)]
	pub mode: FacetMode,

	/// Engine override; defaults to the config file's choice
	#[arg(long)]
	pub engine: Option<EngineKind>,

	/// Service configuration (TOML)
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Print at most this many matching items
	#[arg(long, value_name = "N")]
	pub limit: Option<usize>,
}

impl SearchArgs {
	pub fn query(&self) -> Query {
		self.facets
			.iter()
			.fold(Query::new(), |query, facet| query.accept(facet.domain.as_str(), facet.values.iter().map(String::as_str)))
			.with_mode(self.mode)
	}
}

/// One `--facet DOMAIN=V1,V2` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetArg {
	pub domain: String,
	pub values: Vec<String>,
}

/// Parses `DOMAIN=V1,V2`. `DOMAIN=` leaves the domain unrestricted.
pub fn parse_facet(raw: &str) -> Result<FacetArg, String> {
	let (domain, values) = raw.split_once('=').ok_or_else(|| format!("expected DOMAIN=V1,V2, got '{raw}'"))?;
	let domain = domain.trim();
	if domain.is_empty() {
		return Err(format!("missing domain in '{raw}'"));
	}
	Ok(FacetArg {
		domain: domain.to_owned(),
		values: values.split(',').map(str::trim).filter(|value| !value.is_empty()).map(str::to_owned).collect(),
	})
}
