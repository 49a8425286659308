use super::context::{load_config, load_credentials};
use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use filmoteka_config::{Config, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        ConfigCommands::Show { full } => show_config(&path_manager, full, output),
        ConfigCommands::Server { url, timeout } => configure_server(&path_manager, url, timeout, output),
        ConfigCommands::Token { token, clear } => configure_token(&path_manager, token, clear, output),
        ConfigCommands::Rankings { names } => configure_rankings(&path_manager, names, output),
    }
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let config = load_config(path_manager)?;
    let cred_store = load_credentials(path_manager)?;

    let token = cred_store.get_auth_token().map(String::as_str).unwrap_or("");
    let token_display = if full { token.to_string() } else { mask_string(token) };
    let saved_at = cred_store
        .get_auth_token_saved_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if !config_file.exists() {
                output.warn(format!(
                    "No configuration file at {}, showing defaults",
                    config_file.display()
                ));
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Configuration").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            table.add_row(vec![Cell::new("Server URL"), Cell::new(&config.server.url)]);
            table.add_row(vec![
                Cell::new("Timeout"),
                Cell::new(format!("{}s", config.server.timeout_seconds)),
            ]);
            table.add_row(vec![Cell::new("Auth token"), Cell::new(token_display)]);
            if let Some(saved_at) = &saved_at {
                table.add_row(vec![Cell::new("Token saved"), Cell::new(saved_at)]);
            }
            table.add_row(vec![
                Cell::new("Ranking lists"),
                Cell::new(config.form.ranking_lists.join(", ")),
            ]);
            table.add_row(vec![Cell::new("Page size"), Cell::new(config.list.page_size)]);
            table.add_row(vec![
                Cell::new("Order by"),
                Cell::new(config.list.order_by.as_deref().unwrap_or("(server default)")),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            if token.is_empty() {
                println!(
                    "{}",
                    "No auth token stored; requests are sent without X-Auth-Token".bright_black()
                );
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "configFile": config_file.display().to_string(),
                "server": {
                    "url": config.server.url,
                    "timeoutSeconds": config.server.timeout_seconds,
                },
                "authToken": if token.is_empty() { None } else { Some(token_display) },
                "authTokenSavedAt": saved_at,
                "rankingLists": config.form.ranking_lists,
                "list": {
                    "pageSize": config.list.page_size,
                    "orderBy": config.list.order_by,
                },
            }));
        }
    }

    Ok(())
}

/// Validate before writing so a bad value never reaches the config file
fn save_config(path_manager: &PathManager, config: &Config) -> Result<()> {
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration not saved: {}", e))?;

    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn configure_server(path_manager: &PathManager, url: String, timeout: Option<u64>, output: &Output) -> Result<()> {
    let mut config = load_config(path_manager)?;
    config.server.url = url.trim().to_string();
    if let Some(timeout) = timeout {
        config.server.timeout_seconds = timeout;
    }

    save_config(path_manager, &config)?;
    output.success(format!(
        "Server set to {} (timeout {}s)",
        config.server.url, config.server.timeout_seconds
    ));
    Ok(())
}

fn configure_token(path_manager: &PathManager, token: Option<String>, clear: bool, output: &Output) -> Result<()> {
    let mut cred_store = load_credentials(path_manager)?;

    if clear {
        cred_store.clear_auth_token();
        cred_store
            .save()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
        output.success("Auth token removed");
        return Ok(());
    }

    let token = match token {
        Some(token) => token,
        None => prompts::prompt_password("Auth token")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Auth token cannot be empty (use --clear to remove it)"));
    }

    cred_store.set_auth_token(token);
    cred_store
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    output.success(format!(
        "Auth token saved to {}",
        path_manager.credentials_file().display()
    ));
    Ok(())
}

fn configure_rankings(path_manager: &PathManager, names: Vec<String>, output: &Output) -> Result<()> {
    let mut config = load_config(path_manager)?;
    config.form.ranking_lists = names.into_iter().map(|n| n.trim().to_string()).collect();

    save_config(path_manager, &config)?;
    output.success(format!("Ranking lists: {}", config.form.ranking_lists.join(", ")));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
