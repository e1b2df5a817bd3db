pub mod amp_validation;
pub mod constants;
pub mod contrast;
pub mod diagnostics;
pub mod html_text;
pub mod rules;
pub mod runner;

use std::sync::Arc;

pub use diagnostics::{Diagnostic, Severity};
pub use rules::{
    ElementRule, PageRule, RuleEntry, RuleError, RuleRegistry, RuleResult, StoryRule,
};
pub use runner::{LintRunner, RuleFailure};

use crate::config::Config;
use crate::story::{ElementType, Story};
use rules::{links, media_elements, story_media, story_metadata, text_density, text_elements};

/// Run the checklist with the default configuration.
pub fn lint(story: Option<&Story>) -> Vec<Diagnostic> {
    lint_with_config(story, &Config::default())
}

/// Run the checklist, skipping rules the configuration disables.
pub fn lint_with_config(story: Option<&Story>, config: &Config) -> Vec<Diagnostic> {
    let runner = LintRunner::new(default_registry(config));
    runner.run(story)
}

/// Run the checklist, then AMP validation when it is enabled and the story
/// is published.
pub async fn lint_with_amp_validation(story: Option<&Story>, config: &Config) -> Vec<Diagnostic> {
    let mut diagnostics = lint_with_config(story, config);

    let Some(story) = story else {
        return diagnostics;
    };
    if !config.amp.enabled || amp_validation_disabled(config) {
        return diagnostics;
    }

    let validation = amp_validation::AmpValidation::from_config(&config.amp);
    if let Some(diagnostic) = validation.check(story).await {
        // Errors come first in checklist output.
        let position = diagnostics
            .iter()
            .position(|d| d.severity != Severity::Error)
            .unwrap_or(diagnostics.len());
        diagnostics.insert(position, diagnostic);
    }
    diagnostics
}

fn amp_validation_disabled(config: &Config) -> bool {
    config
        .disabled_rules
        .iter()
        .any(|name| name == amp_validation::RULE_NAME)
}

/// Every rule that can report for `config`, in output order. AMP validation
/// is listed with the error tier; it only runs when enabled.
pub fn rule_entries(config: &Config) -> Vec<RuleEntry> {
    let mut entries = default_registry(config).entries();
    if !amp_validation_disabled(config) {
        let position = entries
            .iter()
            .position(|entry| entry.severity != Severity::Error)
            .unwrap_or(entries.len());
        entries.insert(
            position,
            RuleEntry {
                severity: Severity::Error,
                target: "story".to_string(),
                name: amp_validation::RULE_NAME.to_string(),
            },
        );
    }
    entries
}

/// Create the default rule registry with all built-in rules.
pub fn default_registry(config: &Config) -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    let media = [ElementType::Image, ElementType::Gif];
    let video = [ElementType::Video];
    let text = [ElementType::Text];

    // Errors
    registry.register_story(Severity::Error, Box::new(story_metadata::StoryMissingTitle));
    registry.register_story(Severity::Error, Box::new(story_media::StoryMissingCover));
    registry.register_story(Severity::Error, Box::new(story_media::StoryCoverTooSmall));
    registry.register_story(Severity::Error, Box::new(story_media::StoryCoverAspectRatio));
    registry.register_story(Severity::Error, Box::new(story_media::PublisherLogoTooSmall));
    registry.register_story(Severity::Error, Box::new(links::PageAttachmentLinkConflict));

    // Warnings
    registry.register_story(Severity::Warning, Box::new(story_metadata::StoryMissingExcerpt));
    registry.register_page(Severity::Warning, Box::new(links::PageTooManyLinks));
    registry.register_element(Severity::Warning, &text, Arc::new(text_elements::TextLowContrast));
    registry.register_element(Severity::Warning, &text, Arc::new(text_elements::TextFontTooSmall));
    registry.register_element(
        Severity::Warning,
        &media,
        Arc::new(media_elements::ImageLowResolution),
    );
    registry.register_element(Severity::Warning, &media, Arc::new(media_elements::ImageMissingAlt));
    registry.register_element(Severity::Warning, &video, Arc::new(media_elements::VideoMissingTitle));
    registry.register_element(
        Severity::Warning,
        &video,
        Arc::new(media_elements::VideoMissingCaptions),
    );
    registry.register_element(
        Severity::Warning,
        &video,
        Arc::new(media_elements::VideoMissingPoster),
    );
    registry.register_element(
        Severity::Warning,
        &ElementType::KNOWN,
        Arc::new(links::LinkTapRegionTooSmall),
    );

    // Guidance
    registry.register_story(Severity::Guidance, Box::new(story_metadata::StoryTooShort));
    registry.register_story(Severity::Guidance, Box::new(story_metadata::StoryTooLong));
    registry.register_story(Severity::Guidance, Box::new(story_metadata::StoryTitleTooLong));
    registry.register_story(Severity::Guidance, Box::new(text_density::StoryTooLittleText));
    registry.register_page(Severity::Guidance, Box::new(text_density::PageTooMuchText));
    registry.register_element(
        Severity::Guidance,
        &video,
        Arc::new(media_elements::VideoLowResolution),
    );

    registry.disable(&config.disabled_rules);
    registry
}
