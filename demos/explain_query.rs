//! Builds sample criteria trees and prints their kernel form

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use criteria::criteria::{Expr, LiteralClassification, Lowerer, Predicate, TrimSpec};
use criteria::{
    AstFactory, CriteriaBuilder, EntityType, LoweringOptions, StaticMetamodel, ValueType,
};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Scenario {
    All,
    Abs,
    Count,
    Between,
    Like,
    In,
    Trim,
    Query,
}

/// Explain how criteria expressions lower to the kernel AST
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario to explain
    #[arg(short, long, value_enum, default_value = "all")]
    scenario: Scenario,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// JSON file with lowering options
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Classify every literal as a number
    #[arg(long)]
    legacy_literals: bool,
}

fn load_options(path: Option<&PathBuf>) -> Result<LoweringOptions> {
    let path = match path {
        Some(path) => path,
        None => return Ok(LoweringOptions::new()),
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options from {}", path.display()))?;
    let options = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse options in {}", path.display()))?;
    log::info!("Loaded lowering options from {}", path.display());
    Ok(options)
}

fn model() -> StaticMetamodel {
    StaticMetamodel::new()
        .with_entity(
            EntityType::new("Employee")
                .with_basic("name", ValueType::String)
                .with_basic("age", ValueType::Int32)
                .with_basic("status", ValueType::String)
                .with_basic("salary", ValueType::Double)
                .with_to_one("department", "Department"),
        )
        .with_entity(
            EntityType::new("Department")
                .with_basic("name", ValueType::String)
                .with_to_many("employees", "Employee"),
        )
}

type DemoLowerer<'a> = Lowerer<'a, AstFactory, StaticMetamodel>;

fn explain_value(lowerer: &DemoLowerer<'_>, label: &str, expr: &Expr) -> Result<()> {
    let value = lowerer
        .lower(expr)
        .with_context(|| format!("Failed to lower {}", label))?;
    println!("{:<8} {}", label, expr);
    println!("{:<8} => {}", "", value);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut options = load_options(args.options.as_ref())?;
    if args.legacy_literals {
        options = options.with_literal_classification(LiteralClassification::LegacyNumber);
    }

    let model = model();
    let cb = CriteriaBuilder::new(&model);
    let lowerer = Lowerer::new(&AstFactory, &model).with_options(options);
    let wants = |scenario: Scenario| args.scenario == Scenario::All || args.scenario == scenario;

    let e = cb.root("Employee")?;
    let age = cb.get(&e, "age")?;
    let name = cb.get(&e, "name")?;

    if wants(Scenario::Abs) {
        explain_value(&lowerer, "abs", &cb.abs(-5)?)?;
    }
    if wants(Scenario::Count) {
        explain_value(&lowerer, "count", &cb.count_distinct(&e))?;
    }
    if wants(Scenario::Between) {
        let between = cb.between(&age, 18, 65)?;
        println!("{:<8} {}", "between", between);
        println!("{:<8} => {}", "", lowerer.lower_predicate(&between)?);
    }
    if wants(Scenario::Like) {
        let like = cb.like_escape(&name, "A%_", '\\')?;
        println!("{:<8} {}", "like", like);
        println!("{:<8} => {}", "", lowerer.lower_predicate(&like)?);
    }
    if wants(Scenario::In) {
        let status = cb.get(&e, "status")?;
        let in_list = cb.in_(&status).value("A")?.value("B")?;
        println!("{:<8} {}", "in", in_list);
        let in_list = Predicate::from(in_list);
        println!("{:<8} => {}", "", lowerer.lower_predicate(&in_list)?);
    }
    if wants(Scenario::Trim) {
        for spec in [TrimSpec::Leading, TrimSpec::Trailing, TrimSpec::Both] {
            explain_value(&lowerer, "trim", &cb.trim_with(spec, '*', &name)?)?;
        }
    }
    if wants(Scenario::Query) {
        let mut query = cb.create_query();
        let d = query.from(cb.root("Department")?.with_alias("d"))?;
        let x = query.join(cb.join(&d, "employees")?.with_alias("x"))?;
        let salary = cb.get(&x, "salary")?;

        query
            .multiselect(vec![Expr::from(cb.get(&d, "name")?), cb.avg(&salary)?])
            .filter(cb.greater_than(cb.get(&x, "age")?, 30)?)
            .group_by(cb.get(&d, "name")?)
            .order_by(cb.desc(cb.avg(&salary)?));

        let lowered = query
            .lower(&AstFactory, &model, options)
            .context("Failed to lower query")?;
        println!("query    {}", query);
        println!("{}", lowered);
    }

    Ok(())
}
