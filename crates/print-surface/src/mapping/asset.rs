//! Background image records.
//!
//! Two separate URL policies live here. [`validate_background_url`] is applied
//! to records coming from external callers and rejects anything that is not an
//! absolute http(s) URL. [`merge_background_update`] is the internal update
//! path and repairs relative URLs by prefixing the configured base URL.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constants::BYTES_PER_MB;
use crate::validation::{ValidationError, ValidationReport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A merchant-supplied background/mockup photo
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BackgroundImage {
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_info: FileInfo,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FileInfo {
    pub filename: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub original_name: Option<String>,
    pub size: u64,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "sizeMB", default, skip_serializing_if = "Option::is_none")
    )]
    pub size_mb: Option<String>,
}

impl FileInfo {
    /// Size in megabytes, formatted with two decimals
    pub fn format_size_mb(size: u64) -> String {
        format!("{:.2}", size as f64 / BYTES_PER_MB)
    }
}

/// Partial update accepted on the internal merge path
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct BackgroundImageUpdate {
    pub url: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub file_info: Option<FileInfo>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("URL is required")]
    Empty,
    #[error("URL must be absolute (got relative path {0:?})")]
    Relative(String),
    #[error("URL must start with http:// or https://")]
    UnsupportedScheme,
    #[error("URL is malformed: {0}")]
    Malformed(String),
}

/// Reject anything but a well-formed absolute http(s) URL
pub fn validate_background_url(url: &str) -> std::result::Result<(), AssetError> {
    if url.trim().is_empty() {
        return Err(AssetError::Empty);
    }

    let rest = if let Some(rest) = url.strip_prefix("https://") {
        rest
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else if has_scheme(url) {
        return Err(AssetError::UnsupportedScheme);
    } else {
        return Err(AssetError::Relative(url.to_string()));
    };

    if let Some(c) = url.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(AssetError::Malformed(format!("contains {:?}", c)));
    }

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    // Drop any userinfo before the host
    let host_port = authority.rsplit('@').next().unwrap_or(authority);

    let (host, port) = split_host_port(host_port)?;
    check_host(host)?;
    if let Some(port) = port {
        if port.is_empty() || port.parse::<u16>().is_err() {
            return Err(AssetError::Malformed(format!("invalid port {:?}", port)));
        }
    }

    Ok(())
}

fn split_host_port(host_port: &str) -> std::result::Result<(&str, Option<&str>), AssetError> {
    if let Some(inner) = host_port.strip_prefix('[') {
        // IPv6 literal
        let close = inner
            .find(']')
            .ok_or_else(|| AssetError::Malformed("unterminated IPv6 host".to_string()))?;
        let host = &inner[..close];
        if host.is_empty() || !host.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.') {
            return Err(AssetError::Malformed(format!("invalid IPv6 host {:?}", host)));
        }
        let after = &inner[close + 1..];
        return match after.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None if after.is_empty() => Ok((host, None)),
            None => Err(AssetError::Malformed(format!("unexpected {:?} after host", after))),
        };
    }

    match host_port.split_once(':') {
        Some((host, port)) => Ok((host, Some(port))),
        None => Ok((host_port, None)),
    }
}

fn check_host(host: &str) -> std::result::Result<(), AssetError> {
    if host.is_empty() {
        return Err(AssetError::Malformed("missing host".to_string()));
    }
    if host.contains(':') {
        // Already validated as an IPv6 literal
        return Ok(());
    }
    for label in host.split('.') {
        if label.is_empty() {
            return Err(AssetError::Malformed(format!("empty label in host {:?}", host)));
        }
        if !label
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AssetError::Malformed(format!("invalid host {:?}", host)));
        }
    }
    Ok(())
}

/// Validate a background image record received from an external caller
pub fn validate_background_image(image: &BackgroundImage) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Err(e) = validate_background_url(&image.url) {
        report.push(ValidationError::Invalid {
            field: "Background image URL".to_string(),
            reason: e.to_string(),
        });
    }

    if image.file_info.filename.trim().is_empty() {
        report.push(ValidationError::Invalid {
            field: "Background image filename".to_string(),
            reason: "is required".to_string(),
        });
    }

    report
}

/// Merge an update into the stored background image, repairing what the
/// external validator would reject.
///
/// - Relative URLs are prefixed with `base_url`
/// - `uploadedAt` defaults to `now`
/// - `sizeMB` is derived from `size` when missing
///
/// Fails when no URL is available, when the URL carries a scheme other than
/// http(s), or when the repaired URL is still malformed.
pub fn merge_background_update(
    existing: Option<&BackgroundImage>,
    update: BackgroundImageUpdate,
    base_url: &str,
    now: DateTime<Utc>,
) -> std::result::Result<BackgroundImage, AssetError> {
    let url = update
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .or_else(|| existing.map(|e| e.url.clone()))
        .ok_or(AssetError::Empty)?;
    let url = normalize_url(&url, base_url);
    validate_background_url(&url)?;

    let url_changed = existing.is_none_or(|e| e.url != url);
    let uploaded_at = match (update.uploaded_at, existing) {
        (Some(at), _) => at,
        (None, Some(e)) if !url_changed => e.uploaded_at,
        _ => now,
    };

    let mut file_info = update
        .file_info
        .or_else(|| existing.map(|e| e.file_info.clone()))
        .unwrap_or_default();
    if file_info.size_mb.is_none() {
        file_info.size_mb = Some(FileInfo::format_size_mb(file_info.size));
    }
    if file_info.filename.is_empty() {
        file_info.filename = filename_from_url(&url).to_string();
    }

    Ok(BackgroundImage {
        url,
        uploaded_at,
        file_info,
    })
}

/// Prefix relative URLs with `base_url`. Anything with a scheme passes
/// through untouched, so `ftp:` or `data:` URLs are still rejected later.
pub fn normalize_url(url: &str, base_url: &str) -> String {
    if has_scheme(url) {
        return url.to_string();
    }
    let repaired = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    );
    log::debug!("Repaired relative background URL {:?} -> {:?}", url, repaired);
    repaired
}

/// True when `url` starts with `scheme:`, e.g. `https:`, `ftp:` or `data:`
fn has_scheme(url: &str) -> bool {
    let head_end = url.find(['/', '?', '#']).unwrap_or(url.len());
    let Some((scheme, _)) = url[..head_end].split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn filename_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
