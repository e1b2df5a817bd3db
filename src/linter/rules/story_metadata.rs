use crate::linter::constants::{
    MAX_STORY_PAGES, MAX_STORY_TITLE_LENGTH, MIN_STORY_PAGES, messages,
};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::rules::{RuleResult, StoryRule};
use crate::story::{Story, has_text};

pub struct StoryMissingTitle;

impl StoryRule for StoryMissingTitle {
    fn name(&self) -> &str {
        "story-missing-title"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if !story.title.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(self.name(), messages::STORY_MISSING_TITLE)
                .with_help(messages::STORY_MISSING_TITLE_HELP)
                .with_story(&story.id),
        ))
    }
}

pub struct StoryTitleTooLong;

impl StoryRule for StoryTitleTooLong {
    fn name(&self) -> &str {
        "story-title-too-long"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if story.title.chars().count() <= MAX_STORY_TITLE_LENGTH {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::story_title_too_long())
                .with_story(&story.id),
        ))
    }
}

pub struct StoryMissingExcerpt;

impl StoryRule for StoryMissingExcerpt {
    fn name(&self) -> &str {
        "story-missing-excerpt"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if has_text(story.excerpt.as_deref()) {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::STORY_MISSING_EXCERPT)
                .with_help(messages::STORY_MISSING_EXCERPT_HELP)
                .with_story(&story.id),
        ))
    }
}

pub struct StoryTooShort;

impl StoryRule for StoryTooShort {
    fn name(&self) -> &str {
        "story-too-short"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if story.pages.len() >= MIN_STORY_PAGES {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::story_too_short()).with_story(&story.id),
        ))
    }
}

pub struct StoryTooLong;

impl StoryRule for StoryTooLong {
    fn name(&self) -> &str {
        "story-too-long"
    }

    fn check(&self, story: &Story) -> RuleResult {
        if story.pages.len() <= MAX_STORY_PAGES {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::story_too_long()).with_story(&story.id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{Id, Page};

    fn story_with_title(title: &str) -> Story {
        Story {
            id: Id::Number(7),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn story_with_pages(count: usize) -> Story {
        Story {
            pages: vec![Page::default(); count],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_title() {
        let diag = StoryMissingTitle
            .check(&story_with_title("   "))
            .unwrap()
            .unwrap();
        assert_eq!(diag.code, "story-missing-title");
        assert_eq!(diag.story_id, Some(Id::Number(7)));

        assert!(StoryMissingTitle.check(&story_with_title("Hi")).unwrap().is_none());
    }

    #[test]
    fn test_title_length_boundary() {
        let exactly = "a".repeat(MAX_STORY_TITLE_LENGTH);
        let over = "a".repeat(MAX_STORY_TITLE_LENGTH + 1);

        assert!(StoryTitleTooLong.check(&story_with_title(&exactly)).unwrap().is_none());
        let diag = StoryTitleTooLong
            .check(&story_with_title(&over))
            .unwrap()
            .unwrap();
        assert_eq!(diag.severity, crate::linter::Severity::Guidance);
    }

    #[test]
    fn test_missing_excerpt() {
        let mut story = story_with_title("Title");
        assert!(StoryMissingExcerpt.check(&story).unwrap().is_some());

        story.excerpt = Some("  ".to_string());
        assert!(StoryMissingExcerpt.check(&story).unwrap().is_some());

        story.excerpt = Some("A short summary".to_string());
        assert!(StoryMissingExcerpt.check(&story).unwrap().is_none());
    }

    #[test]
    fn test_page_count_bounds() {
        assert!(StoryTooShort.check(&story_with_pages(3)).unwrap().is_some());
        assert!(StoryTooShort.check(&story_with_pages(4)).unwrap().is_none());
        assert!(StoryTooLong.check(&story_with_pages(30)).unwrap().is_none());
        assert!(StoryTooLong.check(&story_with_pages(31)).unwrap().is_some());
    }
}
