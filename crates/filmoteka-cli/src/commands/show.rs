use super::context::open_session;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use filmoteka_models::Film;

pub async fn run_show(id: u64, output: &Output) -> Result<()> {
    let session = open_session(output)?;

    let spinner = output.spinner(format!("Loading film {}...", id));
    let result = session.service.get_film(id).await;
    spinner.finish_and_clear();

    let film = result.map_err(|e| color_eyre::eyre::eyre!("Could not load film {}: {}", id, e))?;
    print_film(&film, output);
    Ok(())
}

pub fn print_film(film: &Film, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            println!("{}", film_table(film));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(film).unwrap_or_default());
        }
    }
}

fn film_table(film: &Film) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(film.display_title())
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
    ]);

    let id = film.id.map(|id| id.to_string()).unwrap_or_else(|| "(new)".to_string());
    table.add_row(vec![Cell::new("ID"), Cell::new(id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&film.nazov)]);
    table.add_row(vec![Cell::new("Year"), Cell::new(film.rok)]);
    table.add_row(vec![Cell::new("Slovak title"), Cell::new(&film.slovensky_nazov)]);
    table.add_row(vec![Cell::new("IMDb ID"), Cell::new(&film.imdb_id)]);

    for (i, director) in film.reziser.iter().enumerate() {
        let label = if i == 0 { "Directors" } else { "" };
        table.add_row(vec![Cell::new(label), Cell::new(director.full_name())]);
    }
    for (i, role) in film.postava.iter().enumerate() {
        let label = if i == 0 { "Cast" } else { "" };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{} as {} ({})", role.herec.full_name(), role.postava, role.dolezitost)),
        ]);
    }
    for (list, rank) in &film.poradie_v_rebricku {
        table.add_row(vec![Cell::new(list), Cell::new(rank)]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
