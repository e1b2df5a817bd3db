use std::fmt;

use serde::Serialize;

use crate::story::Id;

/// Checklist tier of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Guidance,
}

impl Severity {
    /// Tiers in evaluation (and display) order.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Guidance];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Guidance => "guidance",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding produced by a checklist rule.
///
/// Positional fields are filled in by the rule where it knows them and by the
/// runner otherwise, so the host can navigate to the offending node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<Id>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Id>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Id>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            help: None,
            story_id: None,
            page_id: None,
            element_id: None,
            page: None,
            elements: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn guidance(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Guidance, code, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_story(mut self, id: &Id) -> Self {
        self.story_id = Some(id.clone());
        self
    }

    pub fn with_page_id(mut self, id: &Id) -> Self {
        self.page_id = Some(id.clone());
        self
    }

    pub fn with_element(mut self, id: &Id) -> Self {
        self.element_id = Some(id.clone());
        self
    }

    pub fn with_elements(mut self, ids: Vec<Id>) -> Self {
        self.elements = ids;
        self
    }

    pub fn with_pages(mut self, ids: Vec<Id>) -> Self {
        self.pages = ids;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_builders() {
        let diag = Diagnostic::error("test-error", "Test error message");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, "test-error");
        assert_eq!(diag.message, "Test error message");
        assert!(diag.help.is_none());

        let diag = Diagnostic::guidance("test-guidance", "Test guidance")
            .with_help("More context")
            .with_element(&Id::from("e1"));
        assert_eq!(diag.severity, Severity::Guidance);
        assert_eq!(diag.help.as_deref(), Some("More context"));
        assert_eq!(diag.element_id, Some(Id::from("e1")));
    }

    #[test]
    fn test_serializes_camel_case_and_skips_empty_fields() {
        let mut diag = Diagnostic::warning("page-too-many-links", "Too many links")
            .with_page_id(&Id::from("p1"))
            .with_elements(vec![Id::from("a"), Id::from("b")]);
        diag.page = Some(2);

        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "warning",
                "code": "page-too-many-links",
                "message": "Too many links",
                "pageId": "p1",
                "page": 2,
                "elements": ["a", "b"]
            })
        );
    }

    #[test]
    fn test_numeric_story_id_serializes_as_number() {
        let diag = Diagnostic::error("story-missing-title", "Add a title").with_story(&Id::Number(1));
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["storyId"], serde_json::json!(1));
    }
}
