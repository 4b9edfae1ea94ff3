use crate::core::presenter::Layout;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_note_width")]
    pub note_width: usize,
}

fn default_clear_screen() -> bool {
    true
}
fn default_separator_char() -> String {
    "=".to_string()
}
fn default_note_width() -> usize {
    72
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            clear_screen: default_clear_screen(),
            separator_char: default_separator_char(),
            note_width: default_note_width(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.worklog`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".worklog")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("worklog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("worklog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Database path with `~/` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            separator_char: self.separator_char.clone(),
            note_width: self.note_width,
        }
    }

    /// Write the configuration file (unless `is_test`) and make sure the
    /// database directory exists. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => expand_tilde(&name),
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(AppError::Storage)?;
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(db_path)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.conf");
        fs::write(&path, "database: /tmp/wl.sqlite\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/wl.sqlite");
        assert!(cfg.clear_screen);
        assert_eq!(cfg.separator_char, "=");
        assert_eq!(cfg.note_width, 72);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.conf");
        let cfg = Config {
            database: "~/logs/work.sqlite".into(),
            clear_screen: false,
            separator_char: "-".into(),
            note_width: 40,
        };
        cfg.save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert!(!back.clear_screen);
        assert_eq!(back.layout().note_width, 40);
        assert!(!back.database_path().to_string_lossy().starts_with('~'));
    }

    #[test]
    fn broken_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.conf");
        fs::write(&path, "database: [unterminated\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }
}
