//! Thresholds and message templates shared by the checklist rules.

// Story metadata
pub const MAX_STORY_TITLE_LENGTH: usize = 40;
pub const MIN_STORY_PAGES: usize = 4;
pub const MAX_STORY_PAGES: usize = 30;

// Cover (poster) and publisher logo, in pixels
pub const COVER_MIN_WIDTH: u32 = 640;
pub const COVER_MIN_HEIGHT: u32 = 853;
pub const COVER_ASPECT_RATIO: (u32, u32) = (3, 4);
pub const PUBLISHER_LOGO_MIN_WIDTH: u32 = 96;
pub const PUBLISHER_LOGO_MIN_HEIGHT: u32 = 96;

// Text density, in characters of visible text
pub const MIN_STORY_TEXT_LENGTH: usize = 100;
pub const MAX_PAGE_TEXT_LENGTH: usize = 200;

// Text legibility
pub const MIN_FONT_SIZE: f64 = 12.0;
pub const LARGE_TEXT_FONT_SIZE: f64 = 24.0;
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;

// Links
pub const MAX_LINKS_PER_PAGE: usize = 3;
pub const MIN_LINK_TAP_REGION: f64 = 48.0;

// Video
pub const MIN_VIDEO_HEIGHT: u32 = 480;

// Editor page geometry, in editor units
pub const PAGE_WIDTH: f64 = 412.0;
pub const PAGE_HEIGHT: f64 = 618.0;
pub const FULLBLEED_RATIO: f64 = 9.0 / 19.5;
pub const PAGE_ATTACHMENT_AREA_RATIO: f64 = 0.8;

/// Height of the full-bleed canvas the page sits in.
pub fn fullbleed_height() -> f64 {
    PAGE_WIDTH / FULLBLEED_RATIO
}

/// Part of the full-bleed canvas above and below the safe page area.
pub fn danger_zone_height() -> f64 {
    (fullbleed_height() - PAGE_HEIGHT) / 2.0
}

/// Page y coordinate below which the page attachment sheet takes over.
pub fn page_attachment_boundary() -> f64 {
    fullbleed_height() * PAGE_ATTACHMENT_AREA_RATIO - danger_zone_height()
}

pub mod messages {
    use super::*;

    pub const STORY_MISSING_TITLE: &str = "Add a title to the story";
    pub const STORY_MISSING_TITLE_HELP: &str =
        "The title is shown in search results and on the story's cover.";

    pub fn story_title_too_long() -> String {
        format!("Shorten the story title to {MAX_STORY_TITLE_LENGTH} characters or fewer")
    }

    pub const STORY_MISSING_EXCERPT: &str = "Add a description to the story";
    pub const STORY_MISSING_EXCERPT_HELP: &str =
        "The description is used in search results and link previews.";

    pub fn story_too_short() -> String {
        format!("Add more pages: stories should have at least {MIN_STORY_PAGES} pages")
    }

    pub fn story_too_long() -> String {
        format!("Remove some pages: stories should have at most {MAX_STORY_PAGES} pages")
    }

    pub const STORY_MISSING_COVER: &str = "Add a poster image to the story";

    pub fn story_cover_too_small() -> String {
        format!(
            "Use a poster image of at least {COVER_MIN_WIDTH}x{COVER_MIN_HEIGHT} pixels"
        )
    }

    pub fn story_cover_aspect_ratio() -> String {
        let (w, h) = COVER_ASPECT_RATIO;
        format!("Use a poster image with a {w}:{h} aspect ratio")
    }

    pub fn publisher_logo_too_small() -> String {
        format!(
            "Use a publisher logo of at least {PUBLISHER_LOGO_MIN_WIDTH}x{PUBLISHER_LOGO_MIN_HEIGHT} pixels"
        )
    }

    pub const PAGE_ATTACHMENT_LINK_CONFLICT: &str =
        "Move links out of the page attachment area";
    pub const PAGE_ATTACHMENT_LINK_CONFLICT_HELP: &str =
        "Links placed where the page attachment opens cannot be tapped.";

    pub fn story_too_little_text() -> String {
        format!("Add more text: stories should contain at least {MIN_STORY_TEXT_LENGTH} characters")
    }

    pub fn page_too_much_text() -> String {
        format!("Reduce the text on this page to {MAX_PAGE_TEXT_LENGTH} characters or fewer")
    }

    pub fn page_too_many_links() -> String {
        format!("Keep links to {MAX_LINKS_PER_PAGE} or fewer per page")
    }

    pub fn link_tap_region_too_small() -> String {
        format!(
            "Make linked elements at least {MIN_LINK_TAP_REGION}x{MIN_LINK_TAP_REGION} so they are easy to tap"
        )
    }

    pub const TEXT_LOW_CONTRAST: &str = "Increase the contrast between text and its background";

    pub fn text_font_too_small() -> String {
        format!("Use a font size of at least {MIN_FONT_SIZE}")
    }

    pub const IMAGE_LOW_RESOLUTION: &str =
        "Use a higher resolution image: it is displayed larger than its source";
    pub const IMAGE_MISSING_ALT: &str = "Add assistive text to the image";
    pub const VIDEO_MISSING_TITLE: &str = "Add a title or description to the video";
    pub const VIDEO_MISSING_CAPTIONS: &str = "Add captions to the video";
    pub const VIDEO_MISSING_POSTER: &str = "Add a poster image to the video";

    pub fn video_low_resolution() -> String {
        format!("Use a video of at least {MIN_VIDEO_HEIGHT}p")
    }

    pub const STORY_AMP_VALIDATION: &str = "Fix the AMP validation errors in the published story";
    pub const STORY_AMP_VALIDATION_HELP: &str =
        "Invalid AMP stories are not shown in search results or story carousels.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_attachment_boundary() {
        // 412 / (9 / 19.5) = 892.67; danger zone = (892.67 - 618) / 2 = 137.33
        let boundary = page_attachment_boundary();
        assert!((boundary - 576.8).abs() < 0.01, "boundary was {boundary}");
    }

    #[test]
    fn test_messages_interpolate_thresholds() {
        assert!(messages::story_title_too_long().contains("40"));
        assert!(messages::story_cover_too_small().contains("640x853"));
        assert!(messages::story_cover_aspect_ratio().contains("3:4"));
    }
}
