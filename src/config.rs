//! Configuration loading and management

use std::path::{Path, PathBuf};

/// Default command FIFO (engine -> recognizer)
pub const DEFAULT_COMMAND_FIFO: &str = "/tmp/fcitx-asr-ime-cmd.fifo";

/// Default commit FIFO (recognizer -> engine)
pub const DEFAULT_COMMIT_FIFO: &str = "/tmp/fcitx-asr-ime-commit.fifo";

const CONFIG_DIR_NAME: &str = "asr-ime-fcitx";
const HOTKEY_FILE_NAME: &str = "hotkeys.conf";

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// FIFO the engine writes commands to
    pub command_fifo: PathBuf,

    /// FIFO the engine reads recognized text from
    pub commit_fifo: PathBuf,

    /// User hotkey list, if a config location could be resolved
    pub hotkey_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Self {
        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::resolve(xdg.as_deref(), home.as_deref())
    }

    /// Resolve the configuration from explicit XDG and home directories
    pub fn resolve(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Self {
        let hotkey_file = config_dir(xdg_config_home, home)
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(HOTKEY_FILE_NAME));

        Self {
            command_fifo: PathBuf::from(DEFAULT_COMMAND_FIFO),
            commit_fifo: PathBuf::from(DEFAULT_COMMIT_FIFO),
            hotkey_file,
        }
    }

    /// Build a configuration around explicit FIFO paths, with no hotkey file
    pub fn with_paths(command_fifo: impl Into<PathBuf>, commit_fifo: impl Into<PathBuf>) -> Self {
        Self {
            command_fifo: command_fifo.into(),
            commit_fifo: commit_fifo.into(),
            hotkey_file: None,
        }
    }

    /// Use the given hotkey list instead of the resolved one
    pub fn hotkey_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hotkey_file = Some(path.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}

fn config_dir(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let non_empty = |p: &&Path| !p.as_os_str().is_empty();

    if let Some(xdg) = xdg_config_home.filter(non_empty) {
        return Some(xdg.to_path_buf());
    }
    home.filter(non_empty).map(|home| home.join(".config"))
}
