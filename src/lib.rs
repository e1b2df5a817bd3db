pub mod config;
pub mod error;
pub mod linter;
pub mod story;
pub mod utils;

pub use config::Config;
pub use config::ConfigBuilder;
pub use error::{ChecklistError, Result};
pub use linter::{Diagnostic, Severity};
pub use story::Story;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs the prepublish checklist over a story snapshot.
///
/// Returns diagnostics grouped by tier (errors, then warnings, then
/// guidance). A missing story yields an empty list, and a rule that fails on
/// some element is skipped for that element only.
///
/// # Examples
///
/// ```rust
/// use story_checklist::{Story, run_checklist};
///
/// let story = Story::from_json(r#"{"id": 1, "title": "", "pages": [{"id": "p1"}]}"#).unwrap();
/// let diagnostics = run_checklist(Some(&story));
/// assert!(diagnostics.iter().any(|d| d.code == "story-missing-title"));
/// ```
pub fn run_checklist(story: Option<&Story>) -> Vec<Diagnostic> {
    run_checklist_with_config(story, &Config::default())
}

pub fn run_checklist_with_config(story: Option<&Story>, config: &Config) -> Vec<Diagnostic> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    linter::lint_with_config(story, config)
}

/// Parses a story snapshot and runs the checklist over it.
pub fn check_json(input: &str, config: &Config) -> Result<Vec<Diagnostic>> {
    let story = Story::from_json(input)?;
    Ok(run_checklist_with_config(Some(&story), config))
}
