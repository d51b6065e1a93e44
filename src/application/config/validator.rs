use crate::application::config::models::{Config, DisplayMode, SlotConfig};
use crate::common::error::{CountdownError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Validate configuration for correctness and consistency
pub fn validate_config(config: &Config) -> Result<()> {
    validate_timing(config)?;
    validate_slots(&config.slots)?;

    if config.expired_message.is_empty() {
        return Err(CountdownError::ConfigError(
            "expired_message cannot be empty".to_string(),
        ));
    }

    validate_display(config)?;

    Ok(())
}

fn validate_timing(config: &Config) -> Result<()> {
    if config.tick_interval_ms == 0 {
        return Err(CountdownError::ConfigError(
            "tick_interval_ms must be greater than 0".to_string(),
        ));
    }

    if config.target_epoch_ms.is_none() && config.target_offset_millis().is_none() {
        return Err(CountdownError::ConfigError(format!(
            "Target offset of {} days + {} seconds is too large",
            config.target_offset_days, config.target_offset_secs
        )));
    }

    Ok(())
}

fn validate_slots(slots: &SlotConfig) -> Result<()> {
    let mut seen = HashSet::new();

    for name in slots.all() {
        if name.is_empty() {
            return Err(CountdownError::ConfigError(
                "Slot identifiers cannot be empty".to_string(),
            ));
        }

        // Identifiers end up as HTML id attributes
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CountdownError::ConfigError(format!(
                "Slot identifier '{}' may only contain letters, digits, '-' and '_'",
                name
            )));
        }

        if !seen.insert(name) {
            return Err(CountdownError::ConfigError(format!(
                "Slot identifier '{}' is used more than once",
                name
            )));
        }
    }

    Ok(())
}

fn validate_display(config: &Config) -> Result<()> {
    if config.display != DisplayMode::Page {
        return Ok(());
    }

    match config.page_output {
        Some(ref output) if !output.is_empty() => {}
        _ => {
            return Err(CountdownError::ConfigError(
                "page_output is required when display = \"page\"".to_string(),
            ));
        }
    }

    if let Some(ref template) = config.page_template {
        if !Path::new(template).is_file() {
            return Err(CountdownError::ConfigError(format!(
                "page_template '{}' does not exist or is not a file",
                template
            )));
        }
    }

    Ok(())
}
