use crate::linter::constants::{MAX_PAGE_TEXT_LENGTH, MIN_STORY_TEXT_LENGTH, messages};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::html_text::text_length;
use crate::linter::rules::{PageRule, RuleResult, StoryRule};
use crate::story::{ElementKind, Page, Story};

/// Visible characters across the text elements of a page.
pub fn page_text_length(page: &Page) -> usize {
    page.elements
        .iter()
        .filter_map(|element| match &element.kind {
            ElementKind::Text(text) => Some(text_length(&text.content)),
            _ => None,
        })
        .sum()
}

pub struct StoryTooLittleText;

impl StoryRule for StoryTooLittleText {
    fn name(&self) -> &str {
        "story-too-little-text"
    }

    fn check(&self, story: &Story) -> RuleResult {
        let total: usize = story.pages.iter().map(page_text_length).sum();
        if total >= MIN_STORY_TEXT_LENGTH {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::story_too_little_text())
                .with_story(&story.id),
        ))
    }
}

pub struct PageTooMuchText;

impl PageRule for PageTooMuchText {
    fn name(&self) -> &str {
        "page-too-much-text"
    }

    fn check(&self, page: &Page) -> RuleResult {
        if page_text_length(page) <= MAX_PAGE_TEXT_LENGTH {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::guidance(self.name(), messages::page_too_much_text())
                .with_page_id(&page.id),
        ))
    }
}
