//! Error types for the menu bar
//!
//! The menu surface is small, so the taxonomy is narrow: registry errors that
//! signal programming mistakes (unknown or duplicate menus), plus the
//! configuration and terminal errors the demo binary can hit.

use thiserror::Error;

/// Result type for menu bar operations
pub type MenuResult<T> = Result<T, MenuError>;

/// Main error type for menu bar operations
#[derive(Error, Debug)]
pub enum MenuError {
    /// The label was never registered when the bar was built
    #[error("Cannot add new menu with update_items: {label}")]
    UnknownMenu { label: String },

    /// Two top-level menus share a label
    #[error("Duplicate menu label: {label}")]
    DuplicateMenu { label: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Terminal/Crossterm errors
    #[error("Terminal error: {message}")]
    Terminal { message: String },
}

impl MenuError {
    /// Create an unknown menu error
    pub fn unknown_menu(label: impl Into<String>) -> Self {
        Self::UnknownMenu {
            label: label.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a terminal error
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    /// Whether this error points at misuse of the API rather than the environment
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::UnknownMenu { .. } | Self::DuplicateMenu { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_menu_message() {
        let err = MenuError::unknown_menu("view");
        assert_eq!(
            err.to_string(),
            "Cannot add new menu with update_items: view"
        );
        assert!(err.is_programming_error());
    }

    #[test]
    fn test_terminal_error_message() {
        let err = MenuError::terminal("Failed to enable raw mode: not a tty");
        assert!(matches!(err, MenuError::Terminal { .. }));
        assert_eq!(
            err.to_string(),
            "Terminal error: Failed to enable raw mode: not a tty"
        );
        assert!(!err.is_programming_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MenuError = io.into();
        assert!(matches!(err, MenuError::Io { .. }));
        assert!(!err.is_programming_error());
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{").unwrap_err();
        let err: MenuError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error"));
    }
}
