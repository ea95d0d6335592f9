//! DI container detection.
//!
//! The registry is only emitted when the compilation actually references the
//! configured container type. This sub-pipeline runs per unit and is cached
//! independently of mapper discovery.

use syn::visit::{self, Visit};

use crate::compilation::SourceUnit;

/// Whether `unit` names the container path, either in a `use` tree
/// (`use ferrous_di::ServiceCollection;`, `use ferrous_di::*;`) or in any
/// type or expression path (`ferrous_di::ServiceCollection::new()`).
pub fn references_container(unit: &SourceUnit, container: &str) -> bool {
    let target: Vec<&str> = container
        .trim_start_matches("::")
        .split("::")
        .filter(|segment| !segment.is_empty())
        .collect();
    if target.is_empty() {
        return false;
    }

    let Ok(file) = syn::parse_file(&unit.text) else {
        return false;
    };

    let mut finder = PathFinder {
        target: &target,
        found: false,
    };
    finder.visit_file(&file);
    finder.found
}

struct PathFinder<'a> {
    target: &'a [&'a str],
    found: bool,
}

impl PathFinder<'_> {
    /// Matches the container path anywhere in `segments`, so
    /// `ferrous_di::ServiceCollection::new` counts as well.
    fn check(&mut self, segments: &[String]) {
        if segments
            .windows(self.target.len())
            .any(|window| window.iter().zip(self.target).all(|(a, b)| a == b))
        {
            self.found = true;
        }
    }

    fn check_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.check_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.check(prefix);
                prefix.pop();
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.check(prefix);
                prefix.pop();
            }
            syn::UseTree::Glob(_) => {
                // a glob over the container's module brings it in
                let parent = &self.target[..self.target.len() - 1];
                if !parent.is_empty()
                    && prefix.len() >= parent.len()
                    && prefix[prefix.len() - parent.len()..]
                        .iter()
                        .zip(parent)
                        .all(|(a, b)| a == b)
                {
                    self.found = true;
                }
            }
            syn::UseTree::Group(group) => {
                for tree in &group.items {
                    self.check_use(tree, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathFinder<'_> {
    fn visit_item_use(&mut self, item: &'ast syn::ItemUse) {
        self.check_use(&item.tree, &mut Vec::new());
    }

    fn visit_path(&mut self, path: &'ast syn::Path) {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        self.check(&segments);
        visit::visit_path(self, path);
    }
}
