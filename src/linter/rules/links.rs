use crate::linter::constants::{
    MAX_LINKS_PER_PAGE, MIN_LINK_TAP_REGION, messages, page_attachment_boundary,
};
use crate::linter::diagnostics::Diagnostic;
use crate::linter::rules::{
    ElementRule, PageRule, RuleError, RuleResult, StoryRule, checked_geometry,
};
use crate::story::{Element, Id, Page, Story};
use crate::utils::rotated_corners;

pub struct PageTooManyLinks;

impl PageRule for PageTooManyLinks {
    fn name(&self) -> &str {
        "page-too-many-links"
    }

    fn check(&self, page: &Page) -> RuleResult {
        let linked: Vec<Id> = page.linked_elements().map(|e| e.id.clone()).collect();
        if linked.len() <= MAX_LINKS_PER_PAGE {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::page_too_many_links())
                .with_page_id(&page.id)
                .with_elements(linked),
        ))
    }
}

pub struct LinkTapRegionTooSmall;

impl ElementRule for LinkTapRegionTooSmall {
    fn name(&self) -> &str {
        "link-tap-region-too-small"
    }

    fn check(&self, element: &Element) -> RuleResult {
        if !element.is_linked() {
            return Ok(None);
        }
        checked_geometry(element)?;
        if element.width >= MIN_LINK_TAP_REGION && element.height >= MIN_LINK_TAP_REGION {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::warning(self.name(), messages::link_tap_region_too_small())
                .with_element(&element.id),
        ))
    }
}

/// Whether any corner of the element reaches into the page attachment area.
pub fn reaches_attachment_area(element: &Element) -> Result<bool, RuleError> {
    checked_geometry(element)?;
    let boundary = page_attachment_boundary();
    let corners = rotated_corners(
        element.x,
        element.y,
        element.width,
        element.height,
        element.rotation_angle,
    );
    Ok(corners.iter().any(|corner| corner.y > boundary))
}

pub struct PageAttachmentLinkConflict;

impl StoryRule for PageAttachmentLinkConflict {
    fn name(&self) -> &str {
        "page-attachment-link-conflict"
    }

    fn check(&self, story: &Story) -> RuleResult {
        let mut pages = Vec::new();
        let mut elements = Vec::new();

        for page in &story.pages {
            if page.active_attachment().is_none() {
                continue;
            }
            let mut conflicting = false;
            for element in page.linked_elements() {
                if reaches_attachment_area(element)? {
                    elements.push(element.id.clone());
                    conflicting = true;
                }
            }
            if conflicting {
                pages.push(page.id.clone());
            }
        }

        if pages.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(self.name(), messages::PAGE_ATTACHMENT_LINK_CONFLICT)
                .with_help(messages::PAGE_ATTACHMENT_LINK_CONFLICT_HELP)
                .with_story(&story.id)
                .with_pages(pages)
                .with_elements(elements),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{ElementKind, Link, PageAttachment};

    fn linked(id: &str, url: &str, x: f64, y: f64, width: f64, height: f64) -> Element {
        let mut element = Element::new(id, ElementKind::Shape);
        element.x = x;
        element.y = y;
        element.width = width;
        element.height = height;
        element.link = Some(Link {
            url: url.to_string(),
            desc: None,
        });
        element
    }

    #[test]
    fn test_link_density() {
        let mut page = Page {
            id: Id::from("p1"),
            elements: (0..3)
                .map(|i| linked(&format!("e{i}"), "https://a.example", 0.0, 0.0, 50.0, 50.0))
                .collect(),
            ..Default::default()
        };
        assert!(PageTooManyLinks.check(&page).unwrap().is_none());

        page.elements
            .push(linked("empty", "", 0.0, 0.0, 50.0, 50.0));
        assert!(PageTooManyLinks.check(&page).unwrap().is_none());

        page.elements
            .push(linked("e3", "https://b.example", 0.0, 0.0, 50.0, 50.0));
        let diag = PageTooManyLinks.check(&page).unwrap().unwrap();
        assert_eq!(
            diag.elements,
            vec![
                Id::from("e0"),
                Id::from("e1"),
                Id::from("e2"),
                Id::from("e3")
            ]
        );
        assert_eq!(diag.page_id, Some(Id::from("p1")));
    }

    #[test]
    fn test_tap_region() {
        let big = linked("a", "https://a.example", 0.0, 0.0, 48.0, 48.0);
        assert!(LinkTapRegionTooSmall.check(&big).unwrap().is_none());

        let narrow = linked("b", "https://a.example", 0.0, 0.0, 47.0, 100.0);
        let diag = LinkTapRegionTooSmall.check(&narrow).unwrap().unwrap();
        assert_eq!(diag.element_id, Some(Id::from("b")));

        let unlinked = linked("c", "", 0.0, 0.0, 10.0, 10.0);
        assert!(LinkTapRegionTooSmall.check(&unlinked).unwrap().is_none());
    }

    #[test]
    fn test_non_finite_geometry_is_an_error() {
        let broken = linked("a", "https://a.example", 0.0, 0.0, f64::NAN, 48.0);
        assert!(matches!(
            LinkTapRegionTooSmall.check(&broken),
            Err(RuleError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_attachment_conflict() {
        let attachment = Some(PageAttachment {
            url: "https://shop.example".to_string(),
            cta_text: None,
        });
        let story = Story {
            id: Id::Number(3),
            pages: vec![
                Page {
                    id: Id::from("low"),
                    page_attachment: attachment.clone(),
                    elements: vec![
                        linked("top", "https://a.example", 0.0, 0.0, 100.0, 100.0),
                        linked("bottom", "https://a.example", 0.0, 550.0, 100.0, 50.0),
                    ],
                    ..Default::default()
                },
                Page {
                    id: Id::from("no-attachment"),
                    elements: vec![linked("b2", "https://a.example", 0.0, 550.0, 100.0, 50.0)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let diag = PageAttachmentLinkConflict.check(&story).unwrap().unwrap();
        assert_eq!(diag.pages, vec![Id::from("low")]);
        assert_eq!(diag.elements, vec![Id::from("bottom")]);
        assert_eq!(diag.story_id, Some(Id::Number(3)));
    }

    #[test]
    fn test_rotation_can_reach_attachment_area() {
        // 200x20 bar centered at y = 520: flat it stays above the boundary,
        // upright it spans y 420..620.
        let mut bar = linked("bar", "https://a.example", 100.0, 510.0, 200.0, 20.0);
        assert!(!reaches_attachment_area(&bar).unwrap());

        bar.rotation_angle = 90.0;
        assert!(reaches_attachment_area(&bar).unwrap());
    }
}
