//! Project card
//!
//! [`render_card`] turns one [`NormalizedProject`] into a view tree.
//! [`ProjectCard`] is the element adapter around it: a `project-card` host
//! carrying `data-status`, whose styles live in an open shadow root so they
//! cannot leak into (or be overridden by) the surrounding page.

use crate::view::{Element, ViewNode};
use folio_model::NormalizedProject;

/// Tag name of the card host element
pub const CARD_TAG: &str = "project-card";

/// Star glyph shown before the star count
pub const STAR_GLYPH: char = '\u{2605}';

/// Encapsulated card stylesheet
pub const CARD_STYLES: &str = r#":host { display: block; height: 100%; }
* { box-sizing: border-box; }
article {
  height: 100%;
  display: grid;
  grid-template-rows: auto auto 1fr auto;
  gap: var(--card-gap, 0.9rem);
  padding: 1rem;
  background: var(--card-surface, color-mix(in srgb, var(--foreground) 82%, transparent));
  border: 3px solid var(--card-border, var(--primary-text));
  transition: transform 0.2s ease, border-color 0.2s ease;
}
article:hover { transform: translateY(-4px); border-color: var(--secondary-text); }
header { display: flex; justify-content: space-between; align-items: center; gap: 0.5rem; font-size: 0.78rem; color: var(--secondary-text); }
.status { display: inline-flex; padding: 0.3rem 0.6rem; border: 2px solid currentColor; text-transform: uppercase; }
:host([data-status="Complete"]) .status { color: var(--tertiary-text); border-color: var(--tertiary-text); }
:host([data-status="In Progress"]) .status { color: var(--secondary-text); border-color: var(--secondary-text); }
.meta { display: flex; align-items: center; gap: 0.3rem; color: var(--star-color, #ffff00); }
picture { display: block; width: 100%; border: 3px solid var(--primary-text); background: var(--background); }
picture img { display: block; width: 100%; height: 100%; object-fit: cover; aspect-ratio: 16 / 9; }
h2 { margin: 0; font-size: 1.1rem; color: var(--primary-text); text-transform: uppercase; letter-spacing: 0.06em; }
.timeline { margin: 0.25rem 0 0.75rem; color: var(--secondary-text); font-size: 0.85rem; }
.description { margin: 0; line-height: 1.55; }
ul.tags { list-style: none; margin: 0.75rem 0 0; padding: 0; display: flex; gap: 0.5rem; flex-wrap: wrap; }
ul.tags li { padding: 0.35rem 0.7rem; border: 2px solid var(--primary-text); font-size: 0.8rem; text-transform: uppercase; }
footer { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: auto; }
footer a { flex: 1 1 8rem; text-align: center; text-decoration: none; border: 2px solid var(--primary-text); padding: 0.55rem 0.75rem; color: var(--button-text); text-transform: uppercase; }
footer a:hover, footer a:focus-visible { background-color: var(--primary-text); border-color: var(--secondary-text); }"#;

fn status_class(project: &NormalizedProject) -> String {
    match project.status.modifier() {
        Some(modifier) => format!("status status--{modifier}"),
        None => "status".to_string(),
    }
}

fn outbound_link(href: &str, label: &str) -> Element {
    Element::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text(label)
}

/// Render the card body for one project
#[must_use]
pub fn render_card(project: &NormalizedProject) -> ViewNode {
    let status = project.status.as_str();

    let header = Element::new("header")
        .child(
            Element::new("span")
                .class(status_class(project))
                .child(Element::new("data").attr("value", status).text(status)),
        )
        .child(
            Element::new("span")
                .class("meta")
                .attr("aria-label", "Stars")
                .text(format!("{STAR_GLYPH} {}", project.stars)),
        );

    let picture = Element::new("picture")
        .children(project.cover.sources.iter().map(|source| {
            Element::new("source")
                .attr("srcset", &source.srcset)
                .attr("type", &source.mime)
        }))
        .child(
            Element::new("img")
                .attr("src", project.cover.img_src())
                .attr("alt", &project.alt),
        );

    let body = Element::new("div")
        .child(Element::new("h2").text(&project.title))
        .child(
            Element::new("p")
                .class("timeline")
                .text(format!("{} \u{00b7} {}", project.timeline, project.role)),
        )
        .child(Element::new("p").class("description").text(&project.description))
        .child(
            Element::new("ul")
                .class("tags")
                .children(project.tags.iter().map(|tag| Element::new("li").text(tag))),
        );

    let footer = Element::new("footer")
        .child(outbound_link(&project.demo, "Demo"))
        .child(outbound_link(&project.code, "Code"));

    Element::new("article")
        .attr("role", "listitem")
        .child(header)
        .child(picture)
        .child(body)
        .child(footer)
        .into()
}

/// Display element bound to exactly one project
///
/// Rebinding re-renders the whole card; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    project: NormalizedProject,
    body: ViewNode,
}

impl ProjectCard {
    /// Create a card bound to `project`
    #[must_use]
    pub fn new(project: NormalizedProject) -> Self {
        let body = render_card(&project);
        Self { project, body }
    }

    /// Bound project
    #[inline]
    #[must_use]
    pub fn project(&self) -> &NormalizedProject {
        &self.project
    }

    /// Bind a new project and re-render
    pub fn set_project(&mut self, project: NormalizedProject) {
        self.body = render_card(&project);
        self.project = project;
    }

    /// Rendered card body, without the host element
    #[inline]
    #[must_use]
    pub fn body(&self) -> &ViewNode {
        &self.body
    }

    /// Host element with its encapsulated shadow root
    #[must_use]
    pub fn view(&self) -> ViewNode {
        let shadow_root = Element::new("template")
            .attr("shadowrootmode", "open")
            .child(Element::new("style").text(CARD_STYLES))
            .child(self.body.clone());

        Element::new(CARD_TAG)
            .attr("data-status", self.project.status.as_str())
            .child(shadow_root)
            .into()
    }
}
