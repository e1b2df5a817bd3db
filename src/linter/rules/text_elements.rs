use crate::linter::constants::{MIN_FONT_SIZE, messages};
use crate::linter::contrast::{contrast_ratio, meets_wcag_aa, parse_css_color, relative_luminance};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::html_text::span_colors;
use crate::linter::rules::{ElementRule, RuleResult};
use crate::story::{BackgroundTextMode, Element, ElementKind, Page, Rgba, TextElement};

fn text_of(element: &Element) -> Option<&TextElement> {
    match &element.kind {
        ElementKind::Text(text) => Some(text),
        _ => None,
    }
}

/// The element's own fill, when it paints one behind the text.
fn own_fill(text: &TextElement) -> Option<Rgba> {
    if text.background_text_mode == BackgroundTextMode::None {
        return None;
    }
    text.background_color.as_ref().and_then(|pattern| pattern.color)
}

/// Compares every colored span against the color behind the text: the
/// element's own fill, or else the page's solid background.
///
/// Text over an image or gradient page background cannot be judged here.
pub struct TextLowContrast;

impl TextLowContrast {
    fn evaluate(&self, element: &Element, backdrop: Option<Rgba>) -> RuleResult {
        let Some(text) = text_of(element) else {
            return Ok(None);
        };
        let Some(background) = own_fill(text).or(backdrop) else {
            return Ok(None);
        };

        let background_luminance = relative_luminance(background);
        for value in span_colors(&text.content) {
            let foreground = parse_css_color(&value)?;
            let ratio = contrast_ratio(relative_luminance(foreground), background_luminance);
            if !meets_wcag_aa(ratio, text.font_size) {
                return Ok(Some(
                    Diagnostic::warning(self.name(), messages::TEXT_LOW_CONTRAST)
                        .with_help(format!("Contrast ratio is {ratio:.2}:1"))
                        .with_element(&element.id),
                ));
            }
        }
        Ok(None)
    }
}

impl ElementRule for TextLowContrast {
    fn name(&self) -> &str {
        "text-low-contrast"
    }

    fn check(&self, element: &Element) -> RuleResult {
        self.evaluate(element, None)
    }

    fn check_on_page(&self, element: &Element, page: &Page) -> RuleResult {
        let page_color = page.background_color.as_ref().and_then(|pattern| pattern.color);
        self.evaluate(element, page_color)
    }
}

pub struct TextFontTooSmall;

impl ElementRule for TextFontTooSmall {
    fn name(&self) -> &str {
        "text-font-too-small"
    }

    fn check(&self, element: &Element) -> RuleResult {
        let Some(font_size) = text_of(element).and_then(|text| text.font_size) else {
            return Ok(None);
        };
        if font_size >= MIN_FONT_SIZE {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::text_font_too_small())
                .with_element(&element.id),
        ))
    }
}
