use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::linter::diagnostics::{Diagnostic, Severity};
use crate::story::{Element, ElementType, Page, Story};

pub mod links;
pub mod media_elements;
pub mod story_media;
pub mod story_metadata;
pub mod text_density;
pub mod text_elements;

/// Raised by a rule that cannot make sense of the entity it was given.
///
/// Missing optional data is never an error; rules return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid color value `{0}`")]
    InvalidColor(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("malformed {entity}: {reason}")]
    Malformed {
        entity: &'static str,
        reason: String,
    },
}

pub type RuleResult = Result<Option<Diagnostic>, RuleError>;

/// Reject elements whose geometry cannot be reasoned about.
pub(crate) fn checked_geometry(element: &Element) -> Result<(), RuleError> {
    let values = [
        element.x,
        element.y,
        element.width,
        element.height,
        element.scale,
        element.rotation_angle,
    ];
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RuleError::InvalidGeometry(format!(
            "element {} has non-finite geometry",
            element.id
        )))
    }
}

pub trait StoryRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, story: &Story) -> RuleResult;
}

pub trait PageRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, page: &Page) -> RuleResult;
}

pub trait ElementRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, element: &Element) -> RuleResult;

    /// Check an element in the context of the page it sits on.
    fn check_on_page(&self, element: &Element, _page: &Page) -> RuleResult {
        self.check(element)
    }
}

/// Rules of one severity tier.
#[derive(Default)]
struct Tier {
    story: Vec<Box<dyn StoryRule>>,
    page: Vec<Box<dyn PageRule>>,
    element: HashMap<ElementType, Vec<Arc<dyn ElementRule>>>,
}

/// Rules grouped by tier and by target.
///
/// Element rules are keyed by element type; a type without registered rules
/// simply has none to run.
pub struct RuleRegistry {
    tiers: [Tier; 3],
}

fn tier_index(severity: Severity) -> usize {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Guidance => 2,
    }
}

/// One registered rule, as listed by [`RuleRegistry::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub severity: Severity,
    pub target: String,
    pub name: String,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            tiers: Default::default(),
        }
    }

    pub fn register_story(&mut self, severity: Severity, rule: Box<dyn StoryRule>) {
        self.tiers[tier_index(severity)].story.push(rule);
    }

    pub fn register_page(&mut self, severity: Severity, rule: Box<dyn PageRule>) {
        self.tiers[tier_index(severity)].page.push(rule);
    }

    /// Register one rule for every listed element type.
    pub fn register_element(
        &mut self,
        severity: Severity,
        types: &[ElementType],
        rule: Arc<dyn ElementRule>,
    ) {
        let tier = &mut self.tiers[tier_index(severity)];
        for element_type in types {
            tier.element
                .entry(*element_type)
                .or_default()
                .push(Arc::clone(&rule));
        }
    }

    pub fn story_rules(&self, severity: Severity) -> &[Box<dyn StoryRule>] {
        &self.tiers[tier_index(severity)].story
    }

    pub fn page_rules(&self, severity: Severity) -> &[Box<dyn PageRule>] {
        &self.tiers[tier_index(severity)].page
    }

    pub fn element_rules(
        &self,
        severity: Severity,
        element_type: ElementType,
    ) -> &[Arc<dyn ElementRule>] {
        self.tiers[tier_index(severity)]
            .element
            .get(&element_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop every rule whose name matches `disabled`.
    pub fn disable(&mut self, disabled: &[String]) {
        if disabled.is_empty() {
            return;
        }
        let enabled = |name: &str| !disabled.iter().any(|d| d == name);
        for tier in &mut self.tiers {
            tier.story.retain(|rule| enabled(rule.name()));
            tier.page.retain(|rule| enabled(rule.name()));
            for rules in tier.element.values_mut() {
                rules.retain(|rule| enabled(rule.name()));
            }
        }
    }

    /// All registered rules in evaluation order. Element rules registered for
    /// several types are listed once with their types joined.
    pub fn entries(&self) -> Vec<RuleEntry> {
        let mut entries = Vec::new();
        for severity in Severity::ALL {
            let tier = &self.tiers[tier_index(severity)];
            for rule in &tier.story {
                entries.push(RuleEntry {
                    severity,
                    target: "story".to_string(),
                    name: rule.name().to_string(),
                });
            }
            for rule in &tier.page {
                entries.push(RuleEntry {
                    severity,
                    target: "page".to_string(),
                    name: rule.name().to_string(),
                });
            }

            let mut element_rules: Vec<(String, Vec<ElementType>)> = Vec::new();
            let mut types: Vec<_> = tier.element.keys().copied().collect();
            types.sort();
            for element_type in types {
                for rule in &tier.element[&element_type] {
                    match element_rules
                        .iter()
                        .position(|(name, _)| name.as_str() == rule.name())
                    {
                        Some(index) => element_rules[index].1.push(element_type),
                        None => element_rules.push((rule.name().to_string(), vec![element_type])),
                    }
                }
            }
            for (name, types) in element_rules {
                let target = types
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                entries.push(RuleEntry {
                    severity,
                    target: format!("element:{target}"),
                    name,
                });
            }
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.tiers
            .iter()
            .all(|tier| {
                tier.story.is_empty()
                    && tier.page.is_empty()
                    && tier.element.values().all(Vec::is_empty)
            })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl ElementRule for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn check(&self, _element: &Element) -> RuleResult {
            Ok(None)
        }
    }

    impl StoryRule for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn check(&self, _story: &Story) -> RuleResult {
            Ok(None)
        }
    }

    #[test]
    fn test_unknown_type_has_no_rules() {
        let mut registry = RuleRegistry::new();
        registry.register_element(
            Severity::Warning,
            &[ElementType::Text],
            Arc::new(Named("text-only")),
        );

        assert_eq!(
            registry
                .element_rules(Severity::Warning, ElementType::Text)
                .len(),
            1
        );
        assert!(
            registry
                .element_rules(Severity::Warning, ElementType::Unknown)
                .is_empty()
        );
        assert!(
            registry
                .element_rules(Severity::Error, ElementType::Text)
                .is_empty()
        );
    }

    #[test]
    fn test_disable_removes_rules_everywhere() {
        let mut registry = RuleRegistry::new();
        registry.register_story(Severity::Error, Box::new(Named("keep")));
        registry.register_story(Severity::Error, Box::new(Named("drop")));
        registry.register_element(
            Severity::Warning,
            &[ElementType::Image, ElementType::Gif],
            Arc::new(Named("drop")),
        );

        registry.disable(&["drop".to_string()]);

        let names: Vec<_> = registry.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["keep"]);
    }

    #[test]
    fn test_entries_join_element_types() {
        let mut registry = RuleRegistry::new();
        registry.register_element(
            Severity::Warning,
            &[ElementType::Image, ElementType::Gif],
            Arc::new(Named("image-missing-alt")),
        );

        let entries = registry.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "element:image,gif");
        assert_eq!(entries[0].severity, Severity::Warning);
    }
}
