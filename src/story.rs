//! The story document model consumed by the checklist.
//!
//! These types mirror the editor's camelCase JSON snapshot. The checklist only
//! ever reads them; the host owns loading and mutation.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a story, page or element.
///
/// Editor snapshots use numeric ids for stories and string ids for pages and
/// elements, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    Number(u64),
    Text(String),
}

impl Default for Id {
    fn default() -> Self {
        Id::Text(String::new())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

/// `null` reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pixel dimensions arrive as integers, floats or `null`. Floats are rounded
/// and out of range values are clamped.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !value.is_finite() || value <= 0.0 {
        return Ok(0);
    }
    Ok(value.round().min(f64::from(u32::MAX)) as u32)
}

fn lenient_channel<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !value.is_finite() {
        return Ok(0);
    }
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn lenient_alpha<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(opaque))
}

fn lenient_scale<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(full_scale))
}

/// Entries that fail to parse are logged and dropped, so one malformed page
/// or element does not reject the whole story.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("Skipping malformed entry at index {}: {}", index, err);
                None
            }
        })
        .collect())
}

/// Publishing status as reported by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryStatus {
    #[default]
    Draft,
    AutoDraft,
    Pending,
    Private,
    Future,
    Publish,
    #[serde(other)]
    Unknown,
}

impl StoryStatus {
    /// Whether the story is (or is scheduled to be) publicly reachable.
    pub fn is_published(self) -> bool {
        matches!(self, StoryStatus::Publish | StoryStatus::Future)
    }
}

/// Reference to an image asset with its intrinsic dimensions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "skip_malformed")]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_logo: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StoryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Story {
    /// Parse a story snapshot from its JSON representation.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// The published URL, when one is set and non-empty.
    pub fn published_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|link| !link.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Id,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_attachment: Option<PageAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_audio: Option<serde_json::Value>,
}

impl Page {
    /// The page attachment, if it points somewhere.
    pub fn active_attachment(&self) -> Option<&PageAttachment> {
        self.page_attachment
            .as_ref()
            .filter(|attachment| !attachment.url.trim().is_empty())
    }

    pub fn linked_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|element| element.is_linked())
    }
}

/// The swipe-up link sheet reserved at the bottom of a page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageAttachment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// A fill pattern. Only solid colors carry a `color`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Rgba {
    #[serde(default, deserialize_with = "lenient_channel")]
    pub r: u8,
    #[serde(default, deserialize_with = "lenient_channel")]
    pub g: u8,
    #[serde(default, deserialize_with = "lenient_channel")]
    pub b: u8,
    #[serde(default = "opaque", deserialize_with = "lenient_alpha")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(default = "full_scale", deserialize_with = "lenient_scale")]
    pub scale: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rotation_angle: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn full_scale() -> f64 {
    100.0
}

impl Element {
    pub fn new(id: impl Into<Id>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale: full_scale(),
            rotation_angle: 0.0,
            link: None,
            kind,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// An element is linked when it carries a non-empty link URL.
    pub fn is_linked(&self) -> bool {
        self.link
            .as_ref()
            .is_some_and(|link| !link.url.trim().is_empty())
    }
}

/// Type-specific payload of an element, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextElement),
    Image(MediaElement),
    Gif(MediaElement),
    Video(VideoElement),
    Shape,
    Sticker,
    Product,
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Gif(_) => ElementType::Gif,
            ElementKind::Video(_) => ElementType::Video,
            ElementKind::Shape => ElementType::Shape,
            ElementKind::Sticker => ElementType::Sticker,
            ElementKind::Product => ElementType::Product,
            ElementKind::Unknown => ElementType::Unknown,
        }
    }
}

/// Bare discriminant of [`ElementKind`], used to key element rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Text,
    Image,
    Gif,
    Video,
    Shape,
    Sticker,
    Product,
    Unknown,
}

impl ElementType {
    /// Every type that rules may be registered for.
    pub const KNOWN: [ElementType; 7] = [
        ElementType::Text,
        ElementType::Image,
        ElementType::Gif,
        ElementType::Video,
        ElementType::Shape,
        ElementType::Sticker,
        ElementType::Product,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Gif => "gif",
            ElementType::Video => "video",
            ElementType::Shape => "shape",
            ElementType::Sticker => "sticker",
            ElementType::Product => "product",
            ElementType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackgroundTextMode {
    #[default]
    None,
    Fill,
    Highlight,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Pattern>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background_text_mode: BackgroundTextMode,
}

/// Payload shared by `image` and `gif` elements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tracks: Vec<Track>,
}

/// A media library asset backing an image, gif or video element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tracks: Vec<Track>,
}

/// A caption or subtitle track.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub track: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srclang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.track.trim().is_empty()
    }
}

/// Whether an optional string holds something other than whitespace.
pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}
