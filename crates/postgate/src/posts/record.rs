//! Canonical post record.

use crate::delivery::Link;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// A normalized blog post.
///
/// Records are built only by the field mapper and expose read-only accessors;
/// identity and slug always come from the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub(crate) id: String,
    pub(crate) slug: String,
    pub(crate) published_date: DateTime<Utc>,
    pub(crate) title: String,
    pub(crate) short_description: Option<String>,
    pub(crate) featured_image: Option<Value>,
    pub(crate) content: Value,
    pub(crate) tags: Vec<String>,
    pub(crate) writer: Vec<String>,
    pub(crate) metadata: RecordMetadata,
}

/// Backend metadata carried on a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordMetadata {
    pub tags: Vec<Link>,
}

impl ContentRecord {
    /// Backend-assigned identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// URL slug. Empty when the backend entry had none.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Whether the record has a routable slug.
    pub fn has_slug(&self) -> bool {
        !self.slug.is_empty()
    }

    pub fn published_date(&self) -> DateTime<Utc> {
        self.published_date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    /// The image value exactly as the backend delivered it (after link resolution).
    pub fn featured_image_raw(&self) -> Option<&Value> {
        self.featured_image.as_ref()
    }

    /// Typed view of the featured image, if a URL can be found in it.
    pub fn featured_image(&self) -> Option<FeaturedImage> {
        self.featured_image.as_ref().and_then(FeaturedImage::from_value)
    }

    /// Structured body document, uninterpreted.
    pub fn content(&self) -> &Value {
        &self.content
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn writer(&self) -> &[String] {
        &self.writer
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }
}

/// Image location and optional dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

impl FeaturedImage {
    /// Read an image from either a resolved asset
    /// (`fields.file.url`, `fields.file.details.image.{width,height}`)
    /// or a flat `{url, width, height}` object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let (url, dims) = match value.pointer("/fields/file") {
            Some(file) => (file.get("url"), file.pointer("/details/image")),
            None => (value.get("url"), Some(value)),
        };
        let url = url?.as_str().filter(|u| !u.is_empty())?;
        let dim = |name: &str| dims.and_then(|d| d.get(name)).and_then(Value::as_u64);

        Some(Self {
            url: absolute_url(url),
            width: dim("width"),
            height: dim("height"),
        })
    }
}

/// Asset URLs are delivered protocol-relative (`//images.host/...`).
fn absolute_url(url: &str) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_from_resolved_asset() {
        let asset = json!({
            "sys": {"id": "img-1"},
            "fields": {
                "title": "Cover",
                "file": {
                    "url": "//images.example.net/cover.png",
                    "details": {"image": {"width": 1200, "height": 630}}
                }
            }
        });
        let image = FeaturedImage::from_value(&asset).unwrap();
        assert_eq!(image.url, "https://images.example.net/cover.png");
        assert_eq!(image.width, Some(1200));
        assert_eq!(image.height, Some(630));
    }

    #[test]
    fn test_image_from_flat_shape_without_dimensions() {
        let image = FeaturedImage::from_value(&json!({"url": "https://cdn.example.com/a.jpg"})).unwrap();
        assert_eq!(image.url, "https://cdn.example.com/a.jpg");
        assert!(image.width.is_none());
        assert!(image.height.is_none());
    }

    #[test]
    fn test_image_without_url() {
        assert!(FeaturedImage::from_value(&json!({"width": 10})).is_none());
        // Unresolved link: no URL to offer.
        assert!(FeaturedImage::from_value(&json!({
            "sys": {"type": "Link", "linkType": "Asset", "id": "x"}
        }))
        .is_none());
    }
}
