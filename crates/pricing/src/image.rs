//! Product display image resolution.
//!
//! Stored image fields come in two legacy shapes: a bare URL, or a JSON array
//! of URLs. [`ImageField`] captures both once at the data boundary so display
//! code never re-parses strings.

use serde::{Deserialize, Serialize};
use url::Url;

/// Image shown when a product has no usable image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

const DRIVE_HOST: &str = "drive.google.com";

/// Stored product image(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Multiple(Vec<String>),
    Single(String),
}

impl ImageField {
    /// Interpret a raw stored value.
    ///
    /// JSON arrays (and JSON-quoted strings) are decoded; anything else is
    /// taken verbatim as a single URL.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<ImageField>(raw) {
            Ok(field) => field,
            Err(_) => ImageField::Single(raw.to_string()),
        }
    }

    /// First candidate URL, if there is a non-blank one.
    pub fn first_url(&self) -> Option<&str> {
        let first = match self {
            ImageField::Multiple(urls) => urls.first()?.as_str(),
            ImageField::Single(url) => url.as_str(),
        };
        let first = first.trim();
        (!first.is_empty()).then_some(first)
    }
}

/// Resolves displayable image URLs, falling back to a configured placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    placeholder: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ImageResolver {
    /// A blank placeholder is ignored in favour of the default one.
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        if placeholder.trim().is_empty() {
            return Self::default();
        }
        Self { placeholder }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// URL to render for an already-decoded image field.
    pub fn resolve(&self, field: Option<&ImageField>) -> String {
        field
            .and_then(ImageField::first_url)
            .map(embeddable_url)
            .unwrap_or_else(|| self.placeholder.clone())
    }

    /// URL to render for a raw stored image value. Never fails, never empty.
    pub fn first_display_image(&self, raw: Option<&str>) -> String {
        let field = raw.map(ImageField::parse);
        self.resolve(field.as_ref())
    }
}

/// [`ImageResolver::first_display_image`] with the default placeholder.
pub fn first_display_image(raw: Option<&str>) -> String {
    ImageResolver::default().first_display_image(raw)
}

/// Google Drive "file view" links cannot be used as an image source; rewrite
/// them to the direct-content form. Other URLs pass through.
fn embeddable_url(url: &str) -> String {
    match drive_file_id(url) {
        Some(id) => format!("https://drive.google.com/uc?export=view&id={id}"),
        None => url.to_string(),
    }
}

/// File id of a `drive.google.com/file/d/<id>/...` link (scheme optional).
fn drive_file_id(raw: &str) -> Option<String> {
    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{raw}")).ok()?,
        Err(_) => return None,
    };
    if parsed.host_str()? != DRIVE_HOST {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    match (segments.next(), segments.next(), segments.next()) {
        (Some("file"), Some("d"), Some(id)) if !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}
