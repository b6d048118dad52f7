use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Io and serde errors carry file paths and file contents.
    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Io(_) | Self::Serialization(_) | Self::Anyhow(_) => false,
            Self::Config(_) | Self::InvalidInput(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Io(_) => "Could not read notification settings".to_string(),
                Self::Serialization(_) => "Notification settings file is malformed".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_string_hides_io_details() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "/home/alice/.config/meetdesk/notifications.json",
        ));
        assert!(!err.is_pii_safe());
        assert!(!err.to_safe_string().contains("alice"));
    }

    #[test]
    fn test_config_errors_are_shown_verbatim() {
        let err = AppError::config("channel capacity must be positive");
        assert!(err.is_pii_safe());
        assert_eq!(
            err.to_safe_string(),
            "Configuration error: channel capacity must be positive"
        );
    }
}
