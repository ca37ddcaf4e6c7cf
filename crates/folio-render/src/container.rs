//! Render targets

use crate::view::{Element, ViewNode};

/// Message shown by [`ProjectGrid`] when there is nothing to display
pub const EMPTY_STATE_MESSAGE: &str = "No projects to show yet.";

/// Something project cards can be rendered into
pub trait Container {
    /// Remove all children and any empty-state display
    fn clear(&mut self);

    /// Append one child
    fn append(&mut self, child: ViewNode);

    /// Signal that there is nothing to display
    fn show_empty_state(&mut self);
}

impl<C: Container + ?Sized> Container for &mut C {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn append(&mut self, child: ViewNode) {
        (**self).append(child);
    }

    fn show_empty_state(&mut self) {
        (**self).show_empty_state();
    }
}

/// In-memory project grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGrid {
    id: String,
    children: Vec<ViewNode>,
    empty: bool,
}

impl Default for ProjectGrid {
    fn default() -> Self {
        Self::new("projects-grid")
    }
}

impl ProjectGrid {
    /// Create an empty grid with the given element id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            empty: false,
        }
    }

    /// Current children
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// Check if the empty state is displayed
    #[inline]
    #[must_use]
    pub fn is_showing_empty_state(&self) -> bool {
        self.empty
    }

    /// Grid as a view tree
    #[must_use]
    pub fn view(&self) -> ViewNode {
        if self.empty {
            return Element::new("p")
                .attr("id", &self.id)
                .class("projects-empty")
                .text(EMPTY_STATE_MESSAGE)
                .into();
        }
        Element::new("ul")
            .attr("id", &self.id)
            .attr("role", "list")
            .children(self.children.iter().cloned())
            .into()
    }

    /// Grid serialized to HTML
    #[inline]
    #[must_use]
    pub fn to_html(&self) -> String {
        self.view().to_html()
    }
}

impl Container for ProjectGrid {
    fn clear(&mut self) {
        self.children.clear();
        self.empty = false;
    }

    fn append(&mut self, child: ViewNode) {
        self.empty = false;
        self.children.push(child);
    }

    fn show_empty_state(&mut self) {
        self.empty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_html_lists_children() {
        let mut grid = ProjectGrid::default();
        grid.append(Element::new("li").text("a").into());

        assert_eq!(
            grid.to_html(),
            "<ul id=\"projects-grid\" role=\"list\"><li>a</li></ul>"
        );
    }

    #[test]
    fn grid_empty_state_until_cleared() {
        let mut grid = ProjectGrid::new("g");
        grid.show_empty_state();
        assert!(grid.is_showing_empty_state());
        assert!(grid.to_html().contains(EMPTY_STATE_MESSAGE));

        grid.clear();
        assert!(!grid.is_showing_empty_state());
        assert_eq!(grid.to_html(), "<ul id=\"g\" role=\"list\"></ul>");
    }
}
