use crate::output::Output;
use color_eyre::Result;
use filmoteka_config::PathManager;
use std::fs;

pub fn run_clear(all: bool, credentials: bool, logs: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    clear_paths(&path_manager, all, credentials, logs, output)
}

fn clear_paths(path_manager: &PathManager, all: bool, credentials: bool, logs: bool, output: &Output) -> Result<()> {
    if !(all || credentials || logs) {
        output.warn("No clear option specified. Use --credentials, --logs, or --all");
        return Ok(());
    }

    if all || credentials {
        clear_credentials(path_manager, output)?;
    }
    if all || logs {
        clear_logs(path_manager, output)?;
    }
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}

fn clear_logs(path_manager: &PathManager, output: &Output) -> Result<()> {
    let log_dir = path_manager.log_dir();

    if log_dir.exists() {
        fs::remove_dir_all(log_dir)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to remove logs at {}: {}", log_dir.display(), e))?;
        output.success(format!("Cleared logs: {}", log_dir.display()));
    } else {
        output.info("No logs found to clear");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathManager) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        fs::write(paths.credentials_file(), "[data]\nauth_token = \"abc\"\n").unwrap();
        fs::write(paths.log_file(), "log line\n").unwrap();
        (dir, paths)
    }

    #[test]
    fn test_clear_credentials_only() {
        let (_dir, paths) = setup();
        let output = Output::new(OutputFormat::Human, true);

        clear_paths(&paths, false, true, false, &output).unwrap();
        assert!(!paths.credentials_file().exists());
        assert!(paths.log_file().exists());
    }

    #[test]
    fn test_clear_all() {
        let (_dir, paths) = setup();
        let output = Output::new(OutputFormat::Human, true);

        clear_paths(&paths, true, false, false, &output).unwrap();
        assert!(!paths.credentials_file().exists());
        assert!(!paths.log_dir().exists());
        assert!(paths.config_dir().exists());
    }

    #[test]
    fn test_nothing_selected_keeps_files() {
        let (_dir, paths) = setup();
        let output = Output::new(OutputFormat::Human, true);

        clear_paths(&paths, false, false, false, &output).unwrap();
        assert!(paths.credentials_file().exists());
        assert!(paths.log_file().exists());
    }
}
