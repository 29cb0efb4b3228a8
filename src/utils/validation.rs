use crate::utils::error::{RackError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Servlet 風格的掛載路徑：`/*` 或 `/prefix/*`
pub fn validate_mount_pattern(field_name: &str, pattern: &str) -> Result<()> {
    let invalid = |reason: &str| RackError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: pattern.to_string(),
        reason: reason.to_string(),
    };

    if !pattern.starts_with('/') {
        return Err(invalid("Mount pattern must start with '/'"));
    }
    if !pattern.ends_with("/*") {
        return Err(invalid("Mount pattern must end with '/*'"));
    }
    let prefix = &pattern[..pattern.len() - 2];
    if prefix.contains('*') || prefix.contains("//") || prefix.ends_with('/') {
        return Err(invalid("Mount prefix cannot contain '*' or empty segments"));
    }
    Ok(())
}
