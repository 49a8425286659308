use super::context::{open_session, Session};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use filmoteka_client::FilmsQuery;
use filmoteka_config::Config;
use filmoteka_models::{Film, FilmsResponse};
use owo_colors::OwoColorize;
use serde_json::json;

pub struct ListArgs {
    pub order_by: Option<String>,
    pub descending: bool,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub search: Option<String>,
}

/// Flags win over configured defaults; without paging flags the first page is shown
fn build_query(args: ListArgs, config: &Config) -> FilmsQuery {
    let page_size = config.list.page_size;
    let index_from = args.from.unwrap_or(0);
    let index_to = args.to.unwrap_or_else(|| index_from.saturating_add(page_size));

    FilmsQuery {
        order_by: args.order_by.or_else(|| config.list.order_by.clone()),
        descending: args.descending,
        index_from: Some(index_from),
        index_to: Some(index_to),
        search: args.search,
    }
}

pub async fn run_list(args: ListArgs, output: &Output) -> Result<()> {
    let session = open_session(output)?;
    let query = build_query(args, &session.config);
    fetch_and_print(&session, &query, output).await
}

/// Film list view, also shown after a film has been saved
pub async fn show_first_page(session: &Session, output: &Output) -> Result<()> {
    let query = build_query(
        ListArgs { order_by: None, descending: false, from: None, to: None, search: None },
        &session.config,
    );
    fetch_and_print(session, &query, output).await
}

async fn fetch_and_print(session: &Session, query: &FilmsQuery, output: &Output) -> Result<()> {
    let spinner = output.spinner("Loading films...");
    let result = session.service.get_films(query).await;
    spinner.finish_and_clear();

    let page = result.map_err(|e| color_eyre::eyre::eyre!("Could not load the film list: {}", e))?;
    print_films(&page, query, output);
    Ok(())
}

fn directors(film: &Film) -> String {
    film.reziser
        .iter()
        .map(|p| p.full_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn rankings(film: &Film) -> String {
    film.poradie_v_rebricku
        .iter()
        .map(|(list, rank)| format!("{}: {}", list, rank))
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Showing 21-40 of 42 films"; positions are 1-based and widened so huge offsets cannot overflow
fn range_summary(first: u32, shown: usize, total: u64) -> String {
    let first = u64::from(first);
    format!("Showing {}-{} of {} films", first + 1, first + shown as u64, total)
}

fn print_films(page: &FilmsResponse, query: &FilmsQuery, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            if page.items.is_empty() {
                output.info("No films found");
                return;
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Slovak title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Directors").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Rankings").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for film in &page.items {
                table.add_row(vec![
                    Cell::new(film.id.map(|id| id.to_string()).unwrap_or_default()),
                    Cell::new(&film.nazov),
                    Cell::new(film.rok),
                    Cell::new(&film.slovensky_nazov),
                    Cell::new(directors(film)),
                    Cell::new(rankings(film)),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            let first = query.index_from.unwrap_or(0);
            println!("{}", range_summary(first, page.items.len(), page.total_count).bright_black());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "items": page.items,
                "totalCount": page.total_count,
            }));
        }
    }
}
