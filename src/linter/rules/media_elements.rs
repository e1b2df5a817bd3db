use crate::linter::constants::{MIN_VIDEO_HEIGHT, messages};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::rules::{ElementRule, RuleError, RuleResult, checked_geometry};
use crate::story::{Element, ElementKind, MediaElement, Resource, VideoElement, has_text};

fn image_of(element: &Element) -> Option<&MediaElement> {
    match &element.kind {
        ElementKind::Image(media) | ElementKind::Gif(media) => Some(media),
        _ => None,
    }
}

fn video_of(element: &Element) -> Option<&VideoElement> {
    match &element.kind {
        ElementKind::Video(video) => Some(video),
        _ => None,
    }
}

/// Whether the element is drawn larger than its source at 1x pixel density.
pub fn is_upscaled(element: &Element, resource: &Resource) -> Result<bool, RuleError> {
    checked_geometry(element)?;
    if element.scale <= 0.0 {
        return Err(RuleError::Malformed {
            entity: "element",
            reason: format!("element {} has scale {}", element.id, element.scale),
        });
    }
    let factor = element.scale / 100.0;
    Ok(element.width * factor > f64::from(resource.width)
        || element.height * factor > f64::from(resource.height))
}

pub struct ImageLowResolution;

impl ElementRule for ImageLowResolution {
    fn name(&self) -> &str {
        "image-low-resolution"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(resource) = image_of(element).and_then(|media| media.resource.as_ref()) else {
            return Ok(None);
        };
        // Zero means the library never measured the asset.
        if resource.width == 0 || resource.height == 0 {
            return Ok(None);
        }
        if !is_upscaled(element, resource)? {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::IMAGE_LOW_RESOLUTION)
                .with_element(&element.id),
        ))
    }
}

pub struct ImageMissingAlt;

impl ElementRule for ImageMissingAlt {
    fn name(&self) -> &str {
        "image-missing-alt"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(media) = image_of(element) else {
            return Ok(None);
        };
        let resource_alt = media.resource.as_ref().and_then(|r| r.alt.as_deref());
        if has_text(media.alt.as_deref()) || has_text(resource_alt) {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::IMAGE_MISSING_ALT)
                .with_element(&element.id),
        ))
    }
}

pub struct VideoMissingTitle;

impl ElementRule for VideoMissingTitle {
    fn name(&self) -> &str {
        "video-missing-title"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(video) = video_of(element) else {
            return Ok(None);
        };
        let on_element = has_text(video.alt.as_deref()) || has_text(video.title.as_deref());
        let on_resource = video.resource.as_ref().is_some_and(|resource| {
            has_text(resource.alt.as_deref()) || has_text(resource.title.as_deref())
        });
        if on_element || on_resource {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::VIDEO_MISSING_TITLE)
                .with_element(&element.id),
        ))
    }
}

pub struct VideoMissingCaptions;

impl ElementRule for VideoMissingCaptions {
    fn name(&self) -> &str {
        "video-missing-captions"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(video) = video_of(element) else {
            return Ok(None);
        };
        let resource_tracks = video.resource.iter().flat_map(|r| r.tracks.iter());
        if video
            .tracks
            .iter()
            .chain(resource_tracks)
            .any(|track| !track.is_empty())
        {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::VIDEO_MISSING_CAPTIONS)
                .with_element(&element.id),
        ))
    }
}

pub struct VideoMissingPoster;

impl ElementRule for VideoMissingPoster {
    fn name(&self) -> &str {
        "video-missing-poster"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(video) = video_of(element) else {
            return Ok(None);
        };
        let resource_poster = video.resource.as_ref().and_then(|r| r.poster.as_deref());
        if has_text(video.poster.as_deref()) || has_text(resource_poster) {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::VIDEO_MISSING_POSTER)
                .with_element(&element.id),
        ))
    }
}

pub struct VideoLowResolution;

impl ElementRule for VideoLowResolution {
    fn name(&self) -> &str {
        "video-low-resolution"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(resource) = video_of(element).and_then(|video| video.resource.as_ref()) else {
            return Ok(None);
        };
        if resource.height == 0 || resource.height >= MIN_VIDEO_HEIGHT {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::video_low_resolution())
                .with_element(&element.id),
        ))
    }
}
