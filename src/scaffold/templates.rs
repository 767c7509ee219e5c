//! Project Kind Templates
//!
//! The supported project kinds as a tagged variant with a lookup table.
//! Each kind carries its display label and `.gitignore` body; kind-specific
//! behavior dispatches through the variant, never through names resolved
//! at runtime.

/// A selectable project kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Node,
    Python,
    Rust,
    Go,
    Plain,
}

impl ProjectKind {
    /// All kinds, in menu order.
    pub const ALL: &'static [ProjectKind] = &[
        ProjectKind::Node,
        ProjectKind::Python,
        ProjectKind::Rust,
        ProjectKind::Go,
        ProjectKind::Plain,
    ];

    /// Display label used in the selection menu.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Node => "Node.js",
            ProjectKind::Python => "Python",
            ProjectKind::Rust => "Rust",
            ProjectKind::Go => "Go",
            ProjectKind::Plain => "Plain (no language)",
        }
    }

    /// Resolve a menu label back to its kind.
    pub fn from_label(label: &str) -> Option<ProjectKind> {
        ProjectKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.label() == label)
    }

    /// `.gitignore` body written into a fresh project of this kind.
    pub fn gitignore(&self) -> &'static str {
        match self {
            ProjectKind::Node => "node_modules/\ndist/\n.env\nnpm-debug.log*\n",
            ProjectKind::Python => {
                "__pycache__/\n*.py[cod]\n.venv/\nvenv/\n.env\ndist/\n*.egg-info/\n"
            }
            ProjectKind::Rust => "target/\nCargo.lock\n",
            ProjectKind::Go => "bin/\n*.test\n*.out\nvendor/\n",
            ProjectKind::Plain => ".DS_Store\n*.log\n",
        }
    }

    /// Menu entries for the interactive picker.
    pub fn menu_entries() -> Vec<String> {
        ProjectKind::ALL
            .iter()
            .map(|kind| kind.label().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_unique() {
        let labels: Vec<&str> = ProjectKind::ALL.iter().map(|k| k.label()).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }

    #[test]
    fn test_label_round_trip() {
        for kind in ProjectKind::ALL {
            assert_eq!(ProjectKind::from_label(kind.label()), Some(*kind));
        }
        assert_eq!(ProjectKind::from_label("COBOL"), None);
    }

    #[test]
    fn test_every_kind_has_gitignore_content() {
        for kind in ProjectKind::ALL {
            let body = kind.gitignore();
            assert!(!body.is_empty());
            assert!(body.ends_with('\n'));
        }
    }

    #[test]
    fn test_menu_entries_match_table_order() {
        let entries = ProjectKind::menu_entries();
        assert_eq!(entries.len(), ProjectKind::ALL.len());
        assert_eq!(entries[0], "Node.js");
    }
}
