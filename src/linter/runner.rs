use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::linter::diagnostics::{Diagnostic, Severity};
use crate::linter::rules::{RuleRegistry, RuleResult};
use crate::story::{Id, Story};

/// A rule invocation that failed and was treated as "no finding".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule: String,
    /// Human readable description of the entity, e.g. `page p1`.
    pub target: String,
    pub reason: String,
}

pub type FailureHook = Box<dyn Fn(&RuleFailure) + Send + Sync>;

pub struct LintRunner {
    registry: RuleRegistry,
    on_failure: Option<FailureHook>,
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl LintRunner {
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            on_failure: None,
        }
    }

    /// Report isolated rule failures to `hook` in addition to the debug log.
    pub fn with_failure_hook(mut self, hook: impl Fn(&RuleFailure) + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run one rule, collapsing errors and panics into "no finding".
    fn run_safely(
        &self,
        rule: &str,
        target: impl FnOnce() -> String,
        check: impl FnOnce() -> RuleResult,
    ) -> Option<Diagnostic> {
        let reason = match catch_unwind(AssertUnwindSafe(check)) {
            Ok(Ok(found)) => return found,
            Ok(Err(err)) => err.to_string(),
            Err(payload) => format!("rule panicked: {}", panic_payload_to_string(payload.as_ref())),
        };

        let failure = RuleFailure {
            rule: rule.to_string(),
            target: target(),
            reason,
        };
        log::debug!(
            "Rule {} failed on {}: {}",
            failure.rule,
            failure.target,
            failure.reason
        );
        if let Some(hook) = &self.on_failure {
            hook(&failure);
        }
        None
    }

    /// Evaluate every registered rule against `story`.
    ///
    /// Output is grouped by tier (error, warning, guidance); within a tier,
    /// story findings come first, then page findings, then element findings,
    /// each in document order. A missing story yields no diagnostics.
    pub fn run(&self, story: Option<&Story>) -> Vec<Diagnostic> {
        let Some(story) = story else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for severity in Severity::ALL {
            let tier = self.run_tier(severity, story);
            log::debug!("Tier {} found {} diagnostic(s)", severity, tier.len());
            diagnostics.extend(tier);
        }
        diagnostics
    }

    fn run_tier(&self, severity: Severity, story: &Story) -> Vec<Diagnostic> {
        let mut story_findings = Vec::new();
        let mut page_findings = Vec::new();
        let mut element_findings = Vec::new();

        for rule in self.registry.story_rules(severity) {
            log::debug!("Running story rule: {}", rule.name());
            if let Some(mut diagnostic) = self.run_safely(
                rule.name(),
                || format!("story {}", story.id),
                || rule.check(story),
            ) {
                diagnostic.story_id.get_or_insert_with(|| story.id.clone());
                story_findings.push(diagnostic);
            }
        }

        for (index, page) in story.pages.iter().enumerate() {
            let page_number = index + 1;

            for rule in self.registry.page_rules(severity) {
                if let Some(diagnostic) = self.run_safely(
                    rule.name(),
                    || format!("page {}", page.id),
                    || rule.check(page),
                ) {
                    page_findings.push(locate(diagnostic, &page.id, page_number));
                }
            }

            for element in &page.elements {
                for rule in self
                    .registry
                    .element_rules(severity, element.element_type())
                {
                    if let Some(mut diagnostic) = self.run_safely(
                        rule.name(),
                        || format!("element {} on page {}", element.id, page.id),
                        || rule.check_on_page(element, page),
                    ) {
                        diagnostic
                            .element_id
                            .get_or_insert_with(|| element.id.clone());
                        element_findings.push(locate(diagnostic, &page.id, page_number));
                    }
                }
            }
        }

        story_findings.extend(page_findings);
        story_findings.extend(element_findings);
        story_findings
    }
}

fn locate(mut diagnostic: Diagnostic, page_id: &Id, page_number: usize) -> Diagnostic {
    diagnostic.page_id.get_or_insert_with(|| page_id.clone());
    diagnostic.page = Some(page_number);
    diagnostic
}
