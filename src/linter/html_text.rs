//! Stateless helpers for the HTML fragments stored in text elements.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
});

static SPAN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<span\b[^>]*?\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid span regex")
});

static COLOR_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").expect("valid declaration regex")
});

/// Visible text of an HTML fragment: tags removed, common entities decoded.
pub fn strip_html(content: &str) -> String {
    let without_tags = TAG.replace_all(content, "");
    ENTITY
        .replace_all(&without_tags, |caps: &regex::Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

/// Number of visible characters in an HTML fragment.
pub fn text_length(content: &str) -> usize {
    strip_html(content).chars().count()
}

/// Raw CSS `color` values set on `<span>` runs, in document order.
pub fn span_colors(content: &str) -> Vec<String> {
    SPAN_STYLE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|style| {
            COLOR_DECLARATION
                .captures(style.as_str())
                .map(|decl| decl[1].trim().to_string())
        })
        .collect()
}
