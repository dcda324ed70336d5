//! Theme file codec: the trust boundary for imported theme payloads.
//!
//! A theme file (`.thm`) is UTF-8 JSON: exactly one flat object mapping a
//! fixed set of keys to bounded strings. Version 1 of the format knows the
//! attribute keys `color`, `font`, `cssclass`, `background` and `accent`,
//! plus an optional `"version": "1"` marker. Example:
//!
//! ```json
//! {"version":"1","color":"teal","font":"Verdana","cssclass":"dark-mode"}
//! ```
//!
//! The decoder accepts nothing else. Nested objects, arrays, numbers,
//! booleans, nulls, unknown keys, oversized values and trailing bytes are
//! all rejected before anything is stored. Decoding only ever produces a
//! [`ThemeAttributes`] value; there is no hook through which payload
//! content can name a type or trigger any behavior.
//!
//! [`encode`] is the canonical inverse: it always emits the version marker
//! first and the attribute keys in a fixed order, so an imported theme
//! exports to stable bytes that decode to the same attributes.

use serde::Serialize;

/// Hard cap on the raw payload, checked before parsing.
pub const MAX_PAYLOAD_BYTES: usize = 8 * 1024;

/// Maximum length of a single attribute value, in characters.
pub const MAX_VALUE_CHARS: usize = 256;

/// Maximum length of a theme name.
pub const MAX_NAME_CHARS: usize = 64;

/// Format version emitted by [`encode`] and accepted by [`decode`].
pub const FORMAT_VERSION: &str = "1";

/// Theme names that can never be claimed by an import. `default` names
/// the built-in theme; `active` is taken by the route surface.
pub const RESERVED_NAMES: &[&str] = &["default", "active"];

pub const DEFAULT_COLOR: &str = "black";
pub const DEFAULT_FONT: &str = "sans-serif";
pub const DEFAULT_CSSCLASS: &str = "default";

/// The attributes a theme payload may declare. All optional; defaults are
/// applied at render time via [`ThemeAttributes::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeAttributes {
    pub color: Option<String>,
    pub font: Option<String>,
    pub cssclass: Option<String>,
    pub background: Option<String>,
    pub accent: Option<String>,
}

/// A theme as rendered: the declared attributes with built-in defaults
/// filled in for the core triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    pub color: String,
    pub font: String,
    pub cssclass: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl ResolvedTheme {
    /// The fixed built-in theme used whenever no stored theme applies.
    pub fn built_in_default() -> Self {
        ResolvedTheme {
            color: DEFAULT_COLOR.to_string(),
            font: DEFAULT_FONT.to_string(),
            cssclass: DEFAULT_CSSCLASS.to_string(),
            background: None,
            accent: None,
        }
    }
}

impl ThemeAttributes {
    /// Color to store alongside the record, defaulting if undeclared.
    pub fn derived_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// Font to store alongside the record, defaulting if undeclared.
    pub fn derived_font(&self) -> &str {
        self.font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    /// Apply built-in defaults to produce the render view.
    pub fn resolve(&self) -> ResolvedTheme {
        ResolvedTheme {
            color: self.derived_color().to_string(),
            font: self.derived_font().to_string(),
            cssclass: self
                .cssclass
                .clone()
                .unwrap_or_else(|| DEFAULT_CSSCLASS.to_string()),
            background: self.background.clone(),
            accent: self.accent.clone(),
        }
    }
}

/// Errors produced while validating a theme name or payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeCodecError {
    #[error("payload is {actual} bytes, the cap is {cap}")]
    PayloadTooLarge { actual: usize, cap: usize },

    #[error("payload is not valid JSON: {0}")]
    Syntax(String),

    #[error("payload must be a single flat object")]
    NotAnObject,

    #[error("key '{key}' is not part of the theme schema")]
    UnknownKey { key: String },

    #[error("value for '{key}' must be a string")]
    NonStringValue { key: String },

    #[error("value for '{key}' exceeds {cap} characters")]
    ValueTooLong { key: String, cap: usize },

    #[error("unsupported theme format version '{0}'")]
    UnsupportedVersion(String),

    #[error("invalid theme name '{0}': use letters, digits and underscores")]
    InvalidName(String),

    #[error("theme name '{0}' is reserved")]
    ReservedName(String),
}

/// Validate a requested theme name: identifier pattern, bounded length,
/// not reserved.
pub fn validate_theme_name(name: &str) -> Result<(), ThemeCodecError> {
    if name.is_empty() || name.len() > MAX_NAME_CHARS {
        return Err(ThemeCodecError::InvalidName(truncate_for_display(name)));
    }
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ThemeCodecError::InvalidName(truncate_for_display(name)));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(ThemeCodecError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Decode raw uploaded bytes into [`ThemeAttributes`].
///
/// This is the schema-constrained boundary: every key must belong to the
/// declared set, every value must be a string under [`MAX_VALUE_CHARS`].
/// The first violation aborts the decode; nothing is ever constructed
/// from payload content beyond plain strings.
pub fn decode(raw: &[u8]) -> Result<ThemeAttributes, ThemeCodecError> {
    if raw.len() > MAX_PAYLOAD_BYTES {
        return Err(ThemeCodecError::PayloadTooLarge {
            actual: raw.len(),
            cap: MAX_PAYLOAD_BYTES,
        });
    }

    let value: serde_json::Value =
        serde_json::from_slice(raw).map_err(|e| ThemeCodecError::Syntax(e.to_string()))?;
    let map = value.as_object().ok_or(ThemeCodecError::NotAnObject)?;

    let mut attrs = ThemeAttributes::default();
    for (key, val) in map {
        let text = val
            .as_str()
            .ok_or_else(|| ThemeCodecError::NonStringValue { key: key.clone() })?;
        if text.chars().count() > MAX_VALUE_CHARS {
            return Err(ThemeCodecError::ValueTooLong {
                key: key.clone(),
                cap: MAX_VALUE_CHARS,
            });
        }
        match key.as_str() {
            "version" => {
                if text != FORMAT_VERSION {
                    return Err(ThemeCodecError::UnsupportedVersion(text.to_string()));
                }
            }
            "color" => attrs.color = Some(text.to_string()),
            "font" => attrs.font = Some(text.to_string()),
            "cssclass" => attrs.cssclass = Some(text.to_string()),
            "background" => attrs.background = Some(text.to_string()),
            "accent" => attrs.accent = Some(text.to_string()),
            other => {
                return Err(ThemeCodecError::UnknownKey {
                    key: other.to_string(),
                })
            }
        }
    }

    Ok(attrs)
}

// Serialization order is the canonical key order of the format.
#[derive(Serialize)]
struct WireTheme<'a> {
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cssclass: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accent: Option<&'a str>,
}

/// Encode attributes back into the canonical wire form. Only declared
/// attributes are emitted, so `decode(encode(a)) == a`.
pub fn encode(attrs: &ThemeAttributes) -> String {
    let wire = WireTheme {
        version: FORMAT_VERSION,
        color: attrs.color.as_deref(),
        font: attrs.font.as_deref(),
        cssclass: attrs.cssclass.as_deref(),
        background: attrs.background.as_deref(),
        accent: attrs.accent.as_deref(),
    };
    serde_json::to_string(&wire).expect("flat string map serializes")
}

fn truncate_for_display(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}
