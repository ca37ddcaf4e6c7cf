//! Grid rendering

use crate::card::ProjectCard;
use crate::container::Container;
use crate::view::{Element, ViewNode};
use folio_model::NormalizedProject;
use tracing::debug;

/// Result of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// This many cards were appended
    Rendered(usize),
    /// Nothing to show; the empty state was raised
    Empty,
}

impl RenderOutcome {
    /// Number of cards now in the container
    #[inline]
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Rendered(n) => n,
            Self::Empty => 0,
        }
    }
}

/// List item wrapping one card
#[must_use]
pub fn card_item(project: &NormalizedProject) -> ViewNode {
    Element::new("li")
        .child(ProjectCard::new(project.clone()).view())
        .into()
}

/// Replace the container's content with one card per project
///
/// An empty `projects` leaves the container empty and raises its empty state
/// exactly once.
pub fn render<C>(container: &mut C, projects: &[NormalizedProject]) -> RenderOutcome
where
    C: Container + ?Sized,
{
    container.clear();
    if projects.is_empty() {
        container.show_empty_state();
        debug!("rendered empty project list");
        return RenderOutcome::Empty;
    }
    for project in projects {
        container.append(card_item(project));
    }
    debug!(count = projects.len(), "rendered projects");
    RenderOutcome::Rendered(projects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ProjectGrid;
    use folio_model::{normalize, RawProjectRecord};

    #[derive(Default)]
    struct Recording {
        children: Vec<ViewNode>,
        clears: usize,
        empty_signals: usize,
    }

    impl Container for Recording {
        fn clear(&mut self) {
            self.clears += 1;
            self.children.clear();
        }

        fn append(&mut self, child: ViewNode) {
            self.children.push(child);
        }

        fn show_empty_state(&mut self) {
            self.empty_signals += 1;
        }
    }

    fn projects(titles: &[&str]) -> Vec<NormalizedProject> {
        titles
            .iter()
            .map(|t| normalize(&RawProjectRecord::new().with_title(*t)))
            .collect()
    }

    #[test]
    fn render_empty_raises_signal_once() {
        let mut container = Recording::default();
        let outcome = render(&mut container, &[]);

        assert_eq!(outcome, RenderOutcome::Empty);
        assert!(container.children.is_empty());
        assert_eq!(container.empty_signals, 1);
    }

    #[test]
    fn render_clears_previous_content() {
        let mut container = Recording::default();
        render(&mut container, &projects(&["A", "B", "C"]));
        let outcome = render(&mut container, &projects(&["D"]));

        assert_eq!(outcome, RenderOutcome::Rendered(1));
        assert_eq!(container.children.len(), 1);
        assert_eq!(container.clears, 2);
        assert_eq!(container.empty_signals, 0);
    }

    #[test]
    fn render_keeps_order() {
        let mut grid = ProjectGrid::default();
        render(&mut grid, &projects(&["First", "Second"]));

        let titles: Vec<_> = grid
            .children()
            .iter()
            .map(|item| ViewNode::Element(item.find_all("h2")[0].clone()).text_content())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert!(grid.children().iter().all(|c| c.find_all("project-card").len() == 1));
    }

    #[test]
    fn render_after_empty_clears_empty_state() {
        let mut grid = ProjectGrid::default();
        render(&mut grid, &[]);
        assert!(grid.is_showing_empty_state());

        render(&mut grid, &projects(&["A"]));
        assert!(!grid.is_showing_empty_state());
        assert_eq!(RenderOutcome::Rendered(1).count(), grid.children().len());
    }
}
