//! 設定值與使用者輸入的檢查

use crate::utils::error::{OrderError, Result};
use std::fmt::Display;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn bad_config(field: &str, value: impl Display, reason: impl Into<String>) -> OrderError {
    OrderError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The link base must be an http(s) site root. `Url::join` replaces the last
/// path segment, so a base such as `https://host/en` would silently lose `en`.
pub fn validate_base_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| bad_config(field, raw, format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(bad_config(
            field,
            raw,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(bad_config(
            field,
            raw,
            "Base URL must be a site root without path, query or fragment",
        ));
    }

    Ok(url)
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        Err(bad_config(field, path, "Path cannot be empty"))
    } else if path.contains('\0') {
        Err(bad_config(field, path, "Path contains null bytes"))
    } else {
        Ok(())
    }
}

/// Extension match ignores case, so `ORDER.HTM` is accepted for `htm`.
pub fn validate_file_extension(field: &str, file: &str, allowed: &[&str]) -> Result<()> {
    let extension = Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| bad_config(field, file, "File has no extension"))?;

    if allowed.iter().any(|a| a.eq_ignore_ascii_case(extension)) {
        return Ok(());
    }
    Err(bad_config(
        field,
        file,
        format!("Expected one of: {}", allowed.join(", ")),
    ))
}

pub fn validate_not_blank(field: &str, value: &str) -> Result<()> {
    match value.trim() {
        "" => Err(bad_config(field, value, "Value cannot be blank")),
        _ => Ok(()),
    }
}

/// 檔名前綴不可含目錄分隔符號
pub fn validate_file_prefix(field: &str, prefix: &str) -> Result<()> {
    validate_not_blank(field, prefix)?;
    if prefix.contains(|c: char| c == '/' || c == '\\') {
        return Err(bad_config(
            field,
            prefix,
            "File prefix cannot contain path separators",
        ));
    }
    Ok(())
}

/// Bounds check for numbers the user typed (or that derive from them).
pub fn validate_range<T: PartialOrd + Display>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value >= min && value <= max {
        return Ok(());
    }
    Err(OrderError::InvalidUserInput {
        field: field.to_string(),
        reason: format!("Value must be between {} and {}", min, max),
        value: value.to_string(),
    })
}
