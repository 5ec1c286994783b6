use std::sync::Arc;

use pretty_assertions::assert_eq;
use tally_catalog::shirts::{self, COLOR, Color, SIZE, Size};
use tally_catalog::{AttributeDomain, Catalog, DomainValue, Item, ItemId, Schema};

use crate::{EngineKind, FacetMode, IndexedEngine, Query, ScanEngine, SearchEngine, build_engine};

fn catalog(rows: &[(&str, Size, Color)]) -> Catalog {
	Catalog::new(shirts::schema(), rows.iter().map(|&(name, size, color)| shirts::shirt(name, size, color))).unwrap()
}

fn three_shirts() -> Catalog {
	catalog(&[("Red - Small", Size::Small, Color::Red), ("Black - Medium", Size::Medium, Color::Black), ("Blue - Large", Size::Large, Color::Blue)])
}

fn four_shirts() -> Catalog {
	catalog(&[
		("Red - Small", Size::Small, Color::Red),
		("Red - Medium", Size::Medium, Color::Red),
		("Black - Medium", Size::Medium, Color::Black),
		("Blue - Large", Size::Large, Color::Blue),
	])
}

fn engines(catalog: Catalog) -> Vec<(&'static str, Box<dyn SearchEngine>)> {
	let indexed: Box<dyn SearchEngine> = Box::new(IndexedEngine::new(catalog.clone()));
	let scan: Box<dyn SearchEngine> = Box::new(ScanEngine::new(catalog));
	vec![("indexed", indexed), ("scan", scan)]
}

fn names<E: SearchEngine + ?Sized>(engine: &E, query: &Query) -> Vec<String> {
	engine.search(query).items().map(|item| item.name().to_owned()).collect()
}

fn counts(results: &crate::SearchResults, domain: &str) -> Vec<(String, u64)> {
	results.counts().domain(domain).unwrap().iter().map(|(value, &count)| (value.to_string(), count)).collect()
}

fn pairs(expected: &[(&str, u64)]) -> Vec<(String, u64)> {
	expected.iter().map(|&(value, count)| (value.to_owned(), count)).collect()
}

#[test]
fn single_color_restriction() {
	for (label, engine) in engines(three_shirts()) {
		let query = Query::new().accept(COLOR, ["red"]);
		let results = engine.search(&query);
		assert_eq!(names(&*engine, &query), vec!["Red - Small"], "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 1)]), "{label}");
		assert_eq!(counts(&results, SIZE), pairs(&[("small", 1)]), "{label}");
	}
}

#[test]
fn empty_query_returns_everything_with_true_counts() {
	for (label, engine) in engines(three_shirts()) {
		let results = engine.search(&Query::new());
		assert_eq!(results.len(), 3, "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 1), ("blue", 1), ("black", 1)]), "{label}");
		assert_eq!(counts(&results, SIZE), pairs(&[("small", 1), ("medium", 1), ("large", 1)]), "{label}");
	}
}

#[test]
fn disjoint_restrictions_match_nothing_and_count_nothing() {
	for (label, engine) in engines(three_shirts()) {
		let query = Query::new().accept(SIZE, ["small"]).accept(COLOR, ["black"]);
		let results = engine.search(&query);
		assert!(results.is_empty(), "{label}");
		assert!(results.counts().domain(COLOR).unwrap().is_empty(), "{label}");
		assert!(results.counts().domain(SIZE).unwrap().is_empty(), "{label}");
	}
}

#[test]
fn counts_ignore_their_own_domain() {
	for (label, engine) in engines(four_shirts()) {
		let query = Query::new().accept(SIZE, ["small", "medium"]).accept(COLOR, ["red"]);
		let results = engine.search(&query);
		assert_eq!(names(&*engine, &query), vec!["Red - Small", "Red - Medium"], "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 2)]), "{label}");
		assert_eq!(counts(&results, SIZE), pairs(&[("small", 1), ("medium", 1)]), "{label}");
	}
}

#[test]
fn exploratory_mode_counts_unselected_values() {
	for (label, engine) in engines(four_shirts()) {
		let query = Query::new().accept(SIZE, ["small", "medium"]).accept(COLOR, ["red"]).with_mode(FacetMode::Exploratory);
		let results = engine.search(&query);
		assert_eq!(results.len(), 2, "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 2), ("black", 1)]), "{label}");
		assert_eq!(counts(&results, SIZE), pairs(&[("small", 1), ("medium", 1)]), "{label}");
	}
}

#[test]
fn exploratory_counts_under_disjoint_restrictions() {
	for (label, engine) in engines(three_shirts()) {
		let query = Query::new().accept(SIZE, ["small"]).accept(COLOR, ["black"]).with_mode(FacetMode::Exploratory);
		let results = engine.search(&query);
		assert!(results.is_empty(), "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 1)]), "{label}");
		assert_eq!(counts(&results, SIZE), pairs(&[("medium", 1)]), "{label}");
	}
}

#[test]
fn unknown_values_match_nothing() {
	for (label, engine) in engines(three_shirts()) {
		let results = engine.search(&Query::new().accept(COLOR, ["teal"]));
		assert!(results.is_empty(), "{label}");
		assert!(results.counts().domain(COLOR).unwrap().is_empty(), "{label}");
		assert!(results.counts().domain(SIZE).unwrap().is_empty(), "{label}");

		let results = engine.search(&Query::new().accept(COLOR, ["teal", "red"]));
		assert_eq!(results.len(), 1, "{label}");
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 1)]), "{label}");
	}
}

#[test]
fn undeclared_domain_restriction_matches_nothing() {
	for (label, engine) in engines(three_shirts()) {
		let results = engine.search(&Query::new().accept("sleeve", ["long"]));
		assert!(results.is_empty(), "{label}");
		assert!(results.counts().iter().all(|(_, counts)| counts.is_empty()), "{label}");
	}
}

#[test]
fn counts_cover_every_schema_domain_in_order() {
	let engine = IndexedEngine::new(three_shirts());
	let results = engine.search(&Query::new().accept(COLOR, ["white"]));
	let domains: Vec<_> = results.counts().iter().map(|(domain, _)| domain.to_string()).collect();
	assert_eq!(domains, vec![SIZE, COLOR]);
}

#[test]
fn three_domain_catalog() {
	let fit = AttributeDomain::new("fit", "Fit", [DomainValue::new("slim", "Slim"), DomainValue::new("regular", "Regular")]).unwrap();
	let schema = Schema::new([shirts::size_domain(), shirts::color_domain(), fit]).unwrap();
	let item = |name: &str, size: Size, color: Color, fit: &str| Item::new(ItemId::new_v4(), name).with(SIZE, size.key()).with(COLOR, color.key()).with("fit", fit);
	let catalog = Catalog::new(
		schema,
		[
			item("a", Size::Small, Color::Red, "slim"),
			item("b", Size::Small, Color::Red, "regular"),
			item("c", Size::Large, Color::Red, "slim"),
			item("d", Size::Small, Color::Blue, "slim"),
		],
	)
	.unwrap();

	let query = Query::new().accept(SIZE, ["small"]).accept(COLOR, ["red"]).accept("fit", ["slim"]).with_mode(FacetMode::Exploratory);
	for (label, engine) in engines(catalog) {
		let results = engine.search(&query);
		assert_eq!(names(&*engine, &query), vec!["a"], "{label}");
		// size under red+slim: a, c
		assert_eq!(counts(&results, SIZE), pairs(&[("small", 1), ("large", 1)]), "{label}");
		// color under small+slim: a, d
		assert_eq!(counts(&results, COLOR), pairs(&[("red", 1), ("blue", 1)]), "{label}");
		// fit under small+red: a, b
		assert_eq!(counts(&results, "fit"), pairs(&[("slim", 1), ("regular", 1)]), "{label}");
	}
}

#[test]
fn evaluation_is_idempotent() {
	let engine = IndexedEngine::new(four_shirts());
	let query = Query::new().accept(SIZE, ["medium"]);
	assert_eq!(engine.search(&query), engine.search(&query));
}

#[test]
fn search_many_keeps_query_order() {
	let engine = build_engine(EngineKind::Indexed, four_shirts());
	let queries = vec![Query::new().accept(COLOR, ["red"]), Query::new(), Query::new().accept(COLOR, ["blue"])];
	let results = engine.search_many(&queries);
	assert_eq!(results.iter().map(|results| results.len()).collect::<Vec<_>>(), vec![2, 4, 1]);
	for (query, results) in queries.iter().zip(&results) {
		assert_eq!(&engine.search(query), results);
	}
}

#[test]
fn engines_share_the_catalog_snapshot() {
	let catalog = four_shirts();
	let engine = build_engine(EngineKind::Scan, catalog.clone());
	assert!(engine.catalog().ptr_eq(&catalog));
	assert!(engine.search(&Query::new()).catalog().ptr_eq(&catalog));

	let engine: Arc<dyn SearchEngine> = build_engine(EngineKind::Indexed, catalog.clone());
	assert!(engine.catalog().ptr_eq(&catalog));
}

#[test]
fn engine_kind_parses_lowercase() {
	assert_eq!("scan".parse::<EngineKind>().unwrap(), EngineKind::Scan);
	assert_eq!(EngineKind::Indexed.to_string(), "indexed");
	assert!("btree".parse::<EngineKind>().is_err());
	assert_eq!("exploratory".parse::<FacetMode>().unwrap(), FacetMode::Exploratory);
}

#[test]
fn report_serializes_counts_and_truncates_items() {
	let engine = IndexedEngine::new(four_shirts());
	let report = engine.search(&Query::new().accept(COLOR, ["red"])).report(Some(1));
	assert_eq!(report.total, 2);
	assert_eq!(report.items.len(), 1);

	let json = serde_json::to_value(&report).unwrap();
	assert_eq!(json["total"], 2);
	assert_eq!(json["items"][0]["name"], "Red - Small");
	assert_eq!(json["items"][0]["attributes"]["size"], "small");
	assert_eq!(json["counts"]["color"]["red"], 2);
	assert_eq!(json["counts"]["size"]["medium"], 1);
	assert!(json["counts"]["color"].get("black").is_none());
}
