use crate::linter::constants::{
    COVER_ASPECT_RATIO, COVER_MIN_HEIGHT, COVER_MIN_WIDTH, PUBLISHER_LOGO_MIN_HEIGHT,
    PUBLISHER_LOGO_MIN_WIDTH, messages,
};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::rules::{RuleResult, StoryRule};
use crate::story::{ImageRef, Story};
use crate::utils::gcd;

/// The cover image, when it has a URL.
fn cover(story: &Story) -> Option<&ImageRef> {
    story
        .featured_media
        .as_ref()
        .filter(|media| !media.url.trim().is_empty())
}

pub struct StoryMissingCover;

impl StoryRule for StoryMissingCover {
    fn name(&self) -> &str {
        "story-missing-cover"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if cover(story).is_some() {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(self.name(), messages::STORY_MISSING_COVER).with_story(&story.id),
        ))
    }
}

pub struct StoryCoverTooSmall;

impl StoryRule for StoryCoverTooSmall {
    fn name(&self) -> &str {
        "story-cover-too-small"
    }

    fn check(&self, story: &Story) -> RuleResult {
        let Some(media) = cover(story) else {
            return Ok(None);
        };
        if media.width >= COVER_MIN_WIDTH && media.height >= COVER_MIN_HEIGHT {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(self.name(), messages::story_cover_too_small())
                .with_story(&story.id),
        ))
    }
}

/// Whether `width:height` is the cover ratio.
///
/// Heights within a pixel of the exact ratio count, since 640x853 is the
/// smallest cover the platform accepts.
pub fn has_cover_aspect_ratio(width: u32, height: u32) -> Option<bool> {
    if width == 0 || height == 0 {
        return None;
    }
    let divisor = gcd(Some(u64::from(width)), Some(u64::from(height)))?;
    let (ratio_w, ratio_h) = COVER_ASPECT_RATIO;
    let reduced = (u64::from(width) / divisor, u64::from(height) / divisor);
    if reduced == (u64::from(ratio_w), u64::from(ratio_h)) {
        return Some(true);
    }

    let expected_height = f64::from(width) * f64::from(ratio_h) / f64::from(ratio_w);
    Some((f64::from(height) - expected_height).abs() < 1.0)
}

pub struct StoryCoverAspectRatio;

impl StoryRule for StoryCoverAspectRatio {
    fn name(&self) -> &str {
        "story-cover-aspect-ratio"
    }

    fn check(&self, story: &Story) -> RuleResult {
        let Some(media) = cover(story) else {
            return Ok(None);
        };
        // Missing dimensions are reported by the size check.
        match has_cover_aspect_ratio(media.width, media.height) {
            Some(false) => Ok(Some(
                Diagnostic::error(self.name(), messages::story_cover_aspect_ratio())
                    .with_story(&story.id),
            )),
            _ => Ok(None),
        }
    }
}

pub struct PublisherLogoTooSmall;

impl StoryRule for PublisherLogoTooSmall {
    fn name(&self) -> &str {
        "publisher-logo-too-small"
    }

    fn check(&self, story: &Story) -> RuleResult {
        let Some(logo) = &story.publisher_logo else {
            return Ok(None);
        };
        if logo.width >= PUBLISHER_LOGO_MIN_WIDTH && logo.height >= PUBLISHER_LOGO_MIN_HEIGHT {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(self.name(), messages::publisher_logo_too_small())
                .with_story(&story.id),
        ))
    }
}
