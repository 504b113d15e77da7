//! Client device identification
//!
//! Derives a normalized device descriptor from request headers. The
//! application-defined `X-Device-Info` header is preferred; the
//! `User-Agent` is parsed as a fallback.

use http::{HeaderMap, header};
use lazy_static::lazy_static;
use regex::Regex;

/// Application-defined device header
pub const DEVICE_INFO_HEADER: &str = "x-device-info";

/// Free-text fields are truncated to this many bytes
pub const MAX_FIELD_BYTES: usize = 100;

/// Value woothee reports for fields it could not detect
const UA_UNKNOWN: &str = "UNKNOWN";

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"^\d+(\.\d+)*$").unwrap();
    static ref VERSION_PREFIX_RE: Regex = Regex::new(r"\d+(\.\d+)*").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Desktop,
    Mobile,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "Desktop",
            DeviceType::Mobile => "Mobile",
        }
    }

    /// Case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("desktop") {
            Some(DeviceType::Desktop)
        } else if s.eq_ignore_ascii_case("mobile") {
            Some(DeviceType::Mobile)
        } else {
            None
        }
    }
}

/// Validated device descriptor. Absent versions are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceDescriptor {
    pub device_type: DeviceType,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub os_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceInfoError {
    #[error("invalid device info: {0}")]
    Invalid(&'static str),
}

/// Unvalidated fields as read from a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDeviceInfo {
    pub os: String,
    pub os_version: String,
    pub device_type: String,
    pub browser: String,
    pub browser_version: String,
}

impl RawDeviceInfo {
    /// Parse `key=value; key=value` pairs. Keys are case-insensitive,
    /// unknown keys are ignored, a repeated key keeps its last value.
    pub fn from_header(value: &str) -> Self {
        let mut info = Self::default();

        for pair in value.split(';') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = normalize_field(value);

            match key.trim().to_ascii_lowercase().as_str() {
                "os" => info.os = value,
                "os_version" => info.os_version = value,
                "device_type" => info.device_type = value,
                "browser" => info.browser = value,
                "browser_version" => info.browser_version = value,
                _ => {}
            }
        }

        info
    }

    pub fn from_user_agent(user_agent: &str) -> Self {
        let parser = woothee::parser::Parser::new();
        let Some(result) = parser.parse(user_agent) else {
            return Self::default();
        };

        let is_mobile = result.category == "smartphone" || result.category == "mobilephone";

        Self {
            os: known(&result.os.to_string()),
            os_version: version_prefix(&result.os_version.to_string()),
            device_type: if is_mobile {
                DeviceType::Mobile.as_str().to_string()
            } else {
                DeviceType::Desktop.as_str().to_string()
            },
            browser: known(&result.name.to_string()),
            browser_version: version_prefix(&result.version.to_string()),
        }
    }

    pub fn validate(self) -> Result<DeviceDescriptor, DeviceInfoError> {
        let device_type = DeviceType::parse(&self.device_type)
            .ok_or(DeviceInfoError::Invalid("device_type must be desktop or mobile"))?;

        if self.browser.is_empty() {
            return Err(DeviceInfoError::Invalid("browser is required"));
        }
        if self.os.is_empty() {
            return Err(DeviceInfoError::Invalid("os is required"));
        }
        if !is_valid_version(&self.browser_version) {
            return Err(DeviceInfoError::Invalid("malformed browser_version"));
        }
        if !is_valid_version(&self.os_version) {
            return Err(DeviceInfoError::Invalid("malformed os_version"));
        }

        Ok(DeviceDescriptor {
            device_type,
            browser: self.browser,
            browser_version: self.browser_version,
            os: self.os,
            os_version: self.os_version,
        })
    }
}

/// Explicit header first, user agent second
pub fn resolve_device_descriptor(
    device_info: Option<&str>,
    user_agent: Option<&str>,
) -> Result<DeviceDescriptor, DeviceInfoError> {
    let mut last_error = DeviceInfoError::Invalid("no device information");

    if let Some(value) = device_info.filter(|v| !v.trim().is_empty()) {
        match RawDeviceInfo::from_header(value).validate() {
            Ok(descriptor) => return Ok(descriptor),
            Err(e) => {
                tracing::debug!(reason = %e, "X-Device-Info rejected, trying User-Agent");
                last_error = e;
            }
        }
    }

    if let Some(value) = user_agent.filter(|v| !v.trim().is_empty()) {
        match RawDeviceInfo::from_user_agent(value).validate() {
            Ok(descriptor) => return Ok(descriptor),
            Err(e) => last_error = e,
        }
    }

    Err(last_error)
}

/// Read both headers and resolve the descriptor
pub fn extract_device_descriptor(headers: &HeaderMap) -> Result<DeviceDescriptor, DeviceInfoError> {
    let device_info = headers
        .get(DEVICE_INFO_HEADER)
        .and_then(|v| v.to_str().ok());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    resolve_device_descriptor(device_info, user_agent)
}

/// Empty is valid (absent)
fn is_valid_version(version: &str) -> bool {
    version.is_empty() || VERSION_RE.is_match(version)
}

fn normalize_field(value: &str) -> String {
    truncate_bytes(value.trim(), MAX_FIELD_BYTES)
        .trim_end()
        .to_string()
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn known(value: &str) -> String {
    if value == UA_UNKNOWN {
        String::new()
    } else {
        normalize_field(value)
    }
}

/// "NT 10.0" -> "10.0", "UNKNOWN" -> ""
fn version_prefix(value: &str) -> String {
    VERSION_PREFIX_RE
        .find(value)
        .map(|m| normalize_field(m.as_str()))
        .unwrap_or_default()
}
