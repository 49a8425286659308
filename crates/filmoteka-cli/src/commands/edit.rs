use super::context::open_session;
use super::list::show_first_page;
use super::prompts::{prompt_optional_number, prompt_select, prompt_string, prompt_yes_no};
use super::show::print_film;
use crate::output::Output;
use color_eyre::Result;
use filmoteka_client::FILMS_ROUTE;
use filmoteka_core::{EditorError, FieldError, FilmEditForm, FilmEditor, FormControl, FormError, PersonForm};
use filmoteka_models::{Film, Person, Postava};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Billing values the API uses; anything else can still be typed in
const IMPORTANCE_OPTIONS: [&str; 2] = ["hlavná postava", "vedľajšia postava"];

pub async fn run_edit(id: Option<String>, from_file: Option<PathBuf>, output: &Output) -> Result<()> {
    let session = open_session(output)?;
    let mut editor = FilmEditor::new(session.service.clone(), &session.config.form.ranking_lists);

    let spinner = output.spinner("Loading film...");
    let opened = editor.open(id.as_deref()).await;
    spinner.finish_and_clear();
    opened.map_err(|e| {
        color_eyre::eyre::eyre!("Could not open film {}: {}", id.as_deref().unwrap_or(""), e)
    })?;

    let saved = match from_file {
        Some(path) => {
            let film = read_film_file(&path)?;
            if film.id.is_some() && film.id != editor.film_id() {
                warn!("Ignoring id {:?} from {}; editing {:?}", film.id, path.display(), editor.film_id());
            }
            editor.form_mut().populate(&film);
            submit_from_file(&mut editor, &path, output).await?
        }
        None => match edit_interactively(&mut editor, output).await? {
            Some(saved) => saved,
            None => {
                output.info("Edit cancelled, nothing was saved");
                return Ok(());
            }
        },
    };
    debug!("Saved film id {:?}", saved.id);

    if session.navigator.take().as_deref() == Some(FILMS_ROUTE) {
        show_first_page(&session, output).await?;
    }
    Ok(())
}

fn read_film_file(path: &Path) -> Result<Film> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| color_eyre::eyre::eyre!("{} is not a film JSON document: {}", path.display(), e))
}

async fn submit_from_file(editor: &mut FilmEditor, path: &Path, output: &Output) -> Result<Film> {
    match editor.submit().await {
        Ok(saved) => Ok(saved),
        Err(EditorError::Form(FormError::Invalid(errors))) => {
            for error in &errors {
                output.error(error.to_string());
            }
            Err(color_eyre::eyre::eyre!("{} does not describe a valid film", path.display()))
        }
        Err(e) => Err(color_eyre::eyre::eyre!("Film was not saved: {}", e)),
    }
}

/// Only record an edit when the value really changed, so cancelling stays quiet
fn set_if_changed(control: &mut FormControl<String>, value: String) {
    if *control.value() != value {
        control.set_value(value);
    }
}

fn apply_person(entry: &mut PersonForm, person: Person) {
    set_if_changed(&mut entry.krstne_meno, person.krstne_meno);
    set_if_changed(&mut entry.stredne_meno, person.stredne_meno);
    set_if_changed(&mut entry.priezvisko, person.priezvisko);
}

fn field_label(name: &str, value: &str, path: &str, errors: &[FieldError]) -> String {
    let problems: Vec<String> = errors
        .iter()
        .filter(|e| e.path == path)
        .map(|e| e.error.to_string())
        .collect();

    if problems.is_empty() {
        format!("{:<14} {}", name, value)
    } else {
        format!("{:<14} {}  {} {}", name, value, "✗".red(), problems.join(", "))
    }
}

fn or_unnamed(name: String) -> String {
    if name.is_empty() {
        "(unnamed)".to_string()
    } else {
        name
    }
}

async fn edit_interactively(editor: &mut FilmEditor, output: &Output) -> Result<Option<Film>> {
    let heading = if editor.film().is_new() {
        "New film".to_string()
    } else {
        format!("Editing {}", editor.film().display_title())
    };

    loop {
        let form = editor.form();
        let errors = form.errors();
        let rok = form.rok.value().map(|y| y.to_string()).unwrap_or_default();
        let ranking_errors = errors.iter().any(|e| e.path.starts_with("poradieVRebricku."));
        let items = vec![
            field_label("Title", form.nazov.value(), "nazov", &errors),
            field_label("Year", &rok, "rok", &errors),
            field_label("Slovak title", form.slovensky_nazov.value(), "slovenskyNazov", &errors),
            field_label("IMDb ID", form.imdb_id.value(), "imdbID", &errors),
            format!("{:<14} {}", "Directors", form.reziser().len()),
            format!("{:<14} {}", "Cast", form.postava().len()),
            format!(
                "{:<14} {}{}",
                "Rankings",
                form.rankings().value().len(),
                if ranking_errors { format!("  {}", "✗".red()) } else { String::new() }
            ),
            "Preview".to_string(),
            "Save".to_string(),
            "Cancel".to_string(),
        ];

        match prompt_select(&heading, &items, 0)? {
            0 => {
                let current = form.nazov.value().clone();
                let value = prompt_string("Title", Some(&current))?;
                set_if_changed(&mut editor.form_mut().nazov, value);
            }
            1 => {
                let current = *form.rok.value();
                let value = prompt_optional_number::<i32>("Year", current, output)?;
                if value != current {
                    editor.form_mut().rok.set_value(value);
                }
            }
            2 => {
                let current = form.slovensky_nazov.value().clone();
                let value = prompt_string("Slovak title", Some(&current))?;
                set_if_changed(&mut editor.form_mut().slovensky_nazov, value);
            }
            3 => {
                let current = form.imdb_id.value().clone();
                let value = prompt_string("IMDb ID", Some(&current))?;
                set_if_changed(&mut editor.form_mut().imdb_id, value);
            }
            4 => edit_directors(editor.form_mut())?,
            5 => edit_cast(editor.form_mut())?,
            6 => edit_rankings(editor.form_mut(), output)?,
            7 => match editor.form().submit(editor.film()) {
                Ok(film) => print_film(&film, output),
                Err(e) => output.error(e.to_string()),
            },
            8 => {
                if !errors.is_empty() {
                    for error in &errors {
                        output.error(error.to_string());
                    }
                    continue;
                }
                match editor.submit().await {
                    Ok(saved) => return Ok(Some(saved)),
                    Err(EditorError::Form(e)) => output.error(e.to_string()),
                    // Already reported by the service
                    Err(EditorError::Client(e)) => {
                        if !prompt_yes_no("Keep editing?", Some(true))? {
                            return Err(color_eyre::eyre::eyre!("Film was not saved: {}", e));
                        }
                    }
                }
            }
            _ => {
                if !editor.form().is_dirty() || prompt_yes_no("Discard your changes?", Some(false))? {
                    return Ok(None);
                }
            }
        }
    }
}

enum EntryAction {
    Edit,
    MoveUp,
    MoveDown,
    Remove,
    Back,
}

fn prompt_entry_action(label: &str) -> Result<EntryAction> {
    let actions = ["Edit", "Move up", "Move down", "Remove", "Back"].map(String::from);
    Ok(match prompt_select(label, &actions, 0)? {
        0 => EntryAction::Edit,
        1 => EntryAction::MoveUp,
        2 => EntryAction::MoveDown,
        3 => EntryAction::Remove,
        _ => EntryAction::Back,
    })
}

fn prompt_person(current: &Person) -> Result<Person> {
    Ok(Person {
        id: current.id,
        krstne_meno: prompt_string("First name", Some(&current.krstne_meno))?,
        stredne_meno: prompt_string("Middle name", Some(&current.stredne_meno))?,
        priezvisko: prompt_string("Surname", Some(&current.priezvisko))?,
    })
}

fn prompt_importance(current: &str) -> Result<String> {
    let mut options: Vec<String> = IMPORTANCE_OPTIONS.iter().map(|s| s.to_string()).collect();
    options.push("Other...".to_string());
    let default = IMPORTANCE_OPTIONS
        .iter()
        .position(|o| *o == current)
        .unwrap_or(if current.is_empty() { 0 } else { options.len() - 1 });

    let choice = prompt_select("Importance", &options, default)?;
    if choice < IMPORTANCE_OPTIONS.len() {
        Ok(IMPORTANCE_OPTIONS[choice].to_string())
    } else {
        prompt_string("Importance", Some(current))
    }
}

fn prompt_postava(current: &Postava) -> Result<Postava> {
    let postava = prompt_string("Character", Some(&current.postava))?;
    let dolezitost = prompt_importance(&current.dolezitost)?;
    let herec = prompt_person(&current.herec)?;
    Ok(Postava { postava, dolezitost, herec })
}

fn edit_directors(form: &mut FilmEditForm) -> Result<()> {
    loop {
        let mut items: Vec<String> = form
            .reziser()
            .iter()
            .map(|p| or_unnamed(p.value().full_name()))
            .collect();
        let add_index = items.len();
        items.push("+ Add director".to_string());
        items.push("Back".to_string());

        let choice = prompt_select("Directors", &items, 0)?;
        if choice == add_index {
            let person = prompt_person(&Person::default())?;
            form.add_director(&person);
            continue;
        }
        if choice > add_index {
            return Ok(());
        }

        match prompt_entry_action(&items[choice])? {
            EntryAction::Edit => {
                let current = form.reziser()[choice].value();
                let updated = prompt_person(&current)?;
                apply_person(form.director_mut(choice)?, updated);
            }
            EntryAction::MoveUp if choice > 0 => form.move_director(choice, choice - 1)?,
            EntryAction::MoveDown if choice + 1 < add_index => form.move_director(choice, choice + 1)?,
            EntryAction::Remove => {
                if prompt_yes_no(&format!("Remove {}?", items[choice]), Some(false))? {
                    form.remove_director(choice)?;
                }
            }
            _ => {}
        }
    }
}

fn edit_cast(form: &mut FilmEditForm) -> Result<()> {
    loop {
        let mut items: Vec<String> = form
            .postava()
            .iter()
            .map(|p| {
                let role = p.value();
                format!("{} ({})", or_unnamed(role.postava), or_unnamed(role.herec.full_name()))
            })
            .collect();
        let add_index = items.len();
        items.push("+ Add character".to_string());
        items.push("Back".to_string());

        let choice = prompt_select("Cast", &items, 0)?;
        if choice == add_index {
            let postava = prompt_postava(&Postava::default())?;
            form.add_character(&postava);
            continue;
        }
        if choice > add_index {
            return Ok(());
        }

        match prompt_entry_action(&items[choice])? {
            EntryAction::Edit => {
                let current = form.postava()[choice].value();
                let updated = prompt_postava(&current)?;
                let entry = form.character_mut(choice)?;
                set_if_changed(&mut entry.postava, updated.postava);
                set_if_changed(&mut entry.dolezitost, updated.dolezitost);
                apply_person(&mut entry.herec, updated.herec);
            }
            EntryAction::MoveUp if choice > 0 => form.move_character(choice, choice - 1)?,
            EntryAction::MoveDown if choice + 1 < add_index => form.move_character(choice, choice + 1)?,
            EntryAction::Remove => {
                if prompt_yes_no(&format!("Remove {}?", items[choice]), Some(false))? {
                    form.remove_character(choice)?;
                }
            }
            _ => {}
        }
    }
}

fn edit_rankings(form: &mut FilmEditForm, output: &Output) -> Result<()> {
    let names: Vec<String> = form.rankings().names().map(String::from).collect();
    for name in names {
        let current = form.rankings().get(&name).flatten();
        let rank = prompt_optional_number::<u32>(&format!("{} (empty for none)", name), current, output)?;
        if rank != current {
            form.set_ranking(&name, rank)?;
        }
    }
    Ok(())
}
