//! Extraction of the paths a source file mentions, resolved against the
//! module that file defines.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use syn::visit::Visit;

/// Name the backend library is imported under from its binaries and tests.
const CRATE_NAME: &str = "school_portal";

/// Top-level backend modules that bin targets reach without a `crate::`
/// prefix.
const TOP_LEVEL_MODULES: [&str; 5] = ["domain", "inbound", "outbound", "server", "middleware"];

/// A path mentioned by a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Reference {
    /// A path inside the backend crate, from its root.
    Internal(Vec<String>),
    /// A path into another crate, starting with the crate name.
    External(Vec<String>),
}

/// Module path for a file under `backend/src`.
///
/// `outbound/memory/mod.rs` defines `outbound::memory`, while
/// `outbound/memory/school_repository.rs` defines
/// `outbound::memory::school_repository`.
pub(crate) fn module_path(file: &Path) -> Vec<String> {
    let mut segments: Vec<String> = file
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if let Some(file_name) = segments.pop() {
        let stem = file_name.strip_suffix(".rs").unwrap_or(&file_name);
        if !matches!(stem, "mod" | "lib" | "main") {
            segments.push(stem.to_owned());
        }
    }
    segments
}

/// Resolve `segments` as written inside `module`.
///
/// Returns `None` for paths that climb above the crate root, which do not
/// name anything.
fn resolve(module: &[String], segments: &[String]) -> Option<Reference> {
    let (first, rest) = segments.split_first()?;
    match first.as_str() {
        "crate" | CRATE_NAME => Some(Reference::Internal(rest.to_vec())),
        "self" | "super" => {
            let mut base = module.to_vec();
            let mut remaining = segments;
            while let Some((head, tail)) = remaining.split_first() {
                match head.as_str() {
                    "self" => {}
                    "super" => {
                        base.pop()?;
                    }
                    _ => break,
                }
                remaining = tail;
            }
            base.extend(remaining.iter().cloned());
            Some(Reference::Internal(base))
        }
        root if TOP_LEVEL_MODULES.contains(&root) => Some(Reference::Internal(segments.to_vec())),
        _ => Some(Reference::External(segments.to_vec())),
    }
}

/// Syntax visitor gathering every multi-segment path and `use` tree.
///
/// Inline `mod` blocks shift the module that `self` and `super` resolve
/// against, so a `#[cfg(test)] mod tests { use super::*; }` points back at
/// the enclosing file.
pub(crate) struct ReferenceCollector {
    module: Vec<String>,
    references: BTreeSet<Reference>,
}

impl ReferenceCollector {
    pub(crate) fn new(module: Vec<String>) -> Self {
        Self {
            module,
            references: BTreeSet::new(),
        }
    }

    pub(crate) fn into_references(self) -> BTreeSet<Reference> {
        self.references
    }

    fn record(&mut self, segments: &[String]) {
        if let Some(reference) = resolve(&self.module, segments) {
            self.references.insert(reference);
        }
    }

    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident, .. })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Glob(_) => self.record(prefix),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for ReferenceCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        // Single identifiers are locals or items already in scope.
        if node.segments.len() > 1 {
            let segments: Vec<String> = node
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect();
            self.record(&segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, &mut Vec::new());
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if node.content.is_none() {
            return;
        }
        self.module.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.module.pop();
    }
}
