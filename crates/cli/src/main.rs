use crate::{
    commands::{Commands, FilterArgs},
    error::CliError,
};
use clap::Parser;
use connectors::{postgres::PgCatalog, store::CollectionStore};
use cql_syntax::FilterLang;
use model::{
    queryable::QueryableSchema,
    search::{BboxParam, SearchParams},
};
use planner::plan::SearchPlan;
use serde_json::json;
use tracing::Level;

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "catalog", version = "0.1.0", about = "Collection catalog search tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explain { filters } => {
            let plan = build_plan(&filters)?;
            let output = json!({
                "page_sql": plan.page_sql(),
                "count_sql": plan.count_sql(),
                "params": plan.params(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Ast {
            filter,
            filter_lang,
        } => {
            let lang = match filter_lang.as_deref() {
                Some(tag) => tag
                    .parse::<FilterLang>()
                    .map_err(planner::error::PlanError::from)?,
                None => FilterLang::infer(&filter),
            };
            let expr = cql_syntax::parse(&filter, lang)?;
            println!("{}", serde_json::to_string_pretty(&expr)?);
        }
        Commands::Search { conn_str, filters } => {
            let plan = build_plan(&filters)?;
            let store = PgCatalog::connect(&conn_str).await?;
            let page = store.search(&plan).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

fn build_plan(filters: &FilterArgs) -> Result<SearchPlan, CliError> {
    let search = SearchParams {
        q: filters.q.clone(),
        filter: filters.filter.clone(),
        filter_lang: filters.filter_lang.clone(),
        bbox: filters.bbox.clone().map(BboxParam::Text),
        datetime: filters.datetime.clone(),
        limit: filters.limit,
        offset: filters.offset,
    };
    let plan = SearchPlan::build(&search, QueryableSchema::catalog())?;
    Ok(plan)
}
