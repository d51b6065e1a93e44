use std::fmt;

#[derive(Debug)]
pub enum CountdownError {
    IoError(std::io::Error),
    ConfigError(String),
    DisplayError(String),
    SchedulerError(String),
}

impl fmt::Display for CountdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownError::IoError(e) => write!(f, "IO error: {}", e),
            CountdownError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CountdownError::DisplayError(msg) => write!(f, "Display error: {}", msg),
            CountdownError::SchedulerError(msg) => write!(f, "Scheduler error: {}", msg),
        }
    }
}

impl std::error::Error for CountdownError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CountdownError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CountdownError {
    fn from(err: std::io::Error) -> Self {
        CountdownError::IoError(err)
    }
}

pub type Result<T> = std::result::Result<T, CountdownError>;
