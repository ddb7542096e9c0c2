//! Breadcrumb resolution: locating an entry by its link.

use crate::catalog::Entries;

/// Sibling indices from the top level down to a resolved entry.
///
/// An empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BreadcrumbPath(Vec<usize>);

impl BreadcrumbPath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for BreadcrumbPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl std::fmt::Display for BreadcrumbPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Find the first entry, in pre-order, whose link equals `target`.
///
/// Returns `None` when no entry matches.
pub fn resolve(target: &str, roots: Entries<'_>) -> Option<BreadcrumbPath> {
    let mut trail = Vec::new();
    search(target, roots, &mut trail).then(|| BreadcrumbPath(trail))
}

/// [`resolve`], retrying once with `fallback` when `target` is absent.
pub fn resolve_with_fallback(
    target: &str,
    fallback: Option<&str>,
    roots: Entries<'_>,
) -> Option<BreadcrumbPath> {
    if let Some(path) = resolve(target, roots) {
        log::debug!("Resolved {target:?} to {path}");
        return Some(path);
    }

    let fallback = fallback?;
    log::debug!("{target:?} not in catalog, retrying with {fallback:?}");
    let path = resolve(fallback, roots);
    match &path {
        Some(path) => log::debug!("Resolved fallback {fallback:?} to {path}"),
        None => log::warn!("Neither {target:?} nor fallback {fallback:?} is in the catalog"),
    }
    path
}

fn search(target: &str, entries: Entries<'_>, trail: &mut Vec<usize>) -> bool {
    for (index, entry) in entries.iter().enumerate() {
        trail.push(index);
        if entry.link() == Some(target) {
            return true;
        }
        if let Some(children) = entry.children()
            && search(target, children, trail)
        {
            return true;
        }
        trail.pop();
    }
    false
}
