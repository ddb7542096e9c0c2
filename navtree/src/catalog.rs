//! Compact catalog store.
//!
//! A catalog arrives as nested `(label, link, children)` tuples. [`CatalogStore`]
//! flattens it once into a single record table in which the children of every
//! entry sit next to each other. Live nodes refer to entries by [`EntryId`],
//! so nothing borrows into the nested structure after load.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// =============================================================================
// CatalogEntry
// =============================================================================

/// One serialized catalog entry: `(label, link, children)`.
///
/// Serializes as the three-element array `["label", "link" | null, [...] | null]`.
/// A `None` link marks a pure grouping entry. `None` children marks a leaf;
/// `Some(vec![])` is still expandable, it just has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry(pub String, pub Option<String>, pub Option<Vec<CatalogEntry>>);

impl CatalogEntry {
    /// Create an entry from its three parts.
    pub fn new(
        label: impl Into<String>,
        link: Option<String>,
        children: Option<Vec<CatalogEntry>>,
    ) -> Self {
        Self(label.into(), link, children)
    }

    /// Create a leaf entry pointing at `link`.
    pub fn leaf(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self(label.into(), Some(link.into()), None)
    }

    /// Create an expandable entry with an optional link of its own.
    pub fn branch(
        label: impl Into<String>,
        link: Option<&str>,
        children: Vec<CatalogEntry>,
    ) -> Self {
        Self(label.into(), link.map(str::to_string), Some(children))
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn link(&self) -> Option<&str> {
        self.1.as_deref()
    }

    pub fn children(&self) -> Option<&[CatalogEntry]> {
        self.2.as_deref()
    }
}

// =============================================================================
// Records
// =============================================================================

/// Identifier of an entry inside a [`CatalogStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

impl EntryId {
    /// Position of the entry in the store's record table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A contiguous run of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Span {
    start: u32,
    len: u32,
}

#[derive(Debug, Clone)]
struct Record {
    label: Box<str>,
    link: Option<Box<str>>,
    children: Option<Span>,
}

// =============================================================================
// CatalogStore
// =============================================================================

/// Immutable, flattened catalog.
///
/// Entries are laid out breadth-first: the top-level entries come first, and
/// the children of any entry occupy one contiguous span. Order inside a span
/// is the catalog's display order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Record>,
    roots: Span,
}

impl CatalogStore {
    /// Flatten nested entries into a store.
    pub fn new(roots: Vec<CatalogEntry>) -> Self {
        let mut records = Vec::new();
        let mut pending = VecDeque::new();

        let roots = Self::push_level(&mut records, &mut pending, roots);
        while let Some((owner, children)) = pending.pop_front() {
            let span = Self::push_level(&mut records, &mut pending, children);
            records[owner].children = Some(span);
        }

        Self { records, roots }
    }

    /// Append one sibling list, queueing each expandable entry's children.
    fn push_level(
        records: &mut Vec<Record>,
        pending: &mut VecDeque<(usize, Vec<CatalogEntry>)>,
        entries: Vec<CatalogEntry>,
    ) -> Span {
        let start = records.len();
        for CatalogEntry(label, link, children) in entries {
            let index = records.len();
            records.push(Record {
                label: label.into_boxed_str(),
                link: link.map(String::into_boxed_str),
                children: None,
            });
            if let Some(children) = children {
                pending.push_back((index, children));
            }
        }
        Span {
            start: start as u32,
            len: (records.len() - start) as u32,
        }
    }

    /// Parse a catalog from its JSON array form.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let roots: Vec<CatalogEntry> = serde_json::from_str(text)?;
        validate(&roots, &mut Vec::new())?;
        let store = Self::new(roots);
        log::debug!("Loaded catalog with {} entries", store.len());
        Ok(store)
    }

    /// Parse a catalog from a generated `var NAVTREE = [ ... ];` script.
    ///
    /// Only the first bracketed literal is read; any code after it is ignored.
    pub fn from_script(text: &str) -> Result<Self, CatalogError> {
        let literal = tree_literal(text).ok_or(CatalogError::MissingTree)?;
        Self::from_json(literal)
    }

    /// Load a catalog file. `.js` files are read as scripts, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        log::debug!("Reading catalog from {}", path.display());
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Self::from_script(&text),
            _ => Self::from_json(&text),
        }
    }

    /// The top-level entries, in display order.
    pub fn roots(&self) -> Entries<'_> {
        Entries {
            store: self,
            span: self.roots,
        }
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: EntryId) -> Option<EntryRef<'_>> {
        (id.index() < self.records.len()).then_some(EntryRef { store: self, id })
    }

    /// Total number of entries at every depth.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&self, id: EntryId) -> &Record {
        &self.records[id.index()]
    }
}

/// Reject entries with empty labels, reporting the first one found.
fn validate(entries: &[CatalogEntry], trail: &mut Vec<usize>) -> Result<(), CatalogError> {
    for (index, entry) in entries.iter().enumerate() {
        trail.push(index);
        if entry.label().is_empty() {
            return Err(CatalogError::EmptyLabel { path: trail.clone() });
        }
        if let Some(children) = entry.children() {
            validate(children, trail)?;
        }
        trail.pop();
    }
    Ok(())
}

/// Find the first balanced `[...]` literal, skipping brackets inside strings.
fn tree_literal(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

// =============================================================================
// Views
// =============================================================================

/// Borrowed view of one entry in a [`CatalogStore`].
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    store: &'a CatalogStore,
    id: EntryId,
}

impl<'a> EntryRef<'a> {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn label(&self) -> &'a str {
        &self.store.record(self.id).label
    }

    pub fn link(&self) -> Option<&'a str> {
        self.store.record(self.id).link.as_deref()
    }

    /// Children of this entry, or `None` for a leaf.
    pub fn children(&self) -> Option<Entries<'a>> {
        self.store.record(self.id).children.map(|span| Entries {
            store: self.store,
            span,
        })
    }

    /// Whether this entry is drawn with an expand affordance.
    pub fn is_expandable(&self) -> bool {
        self.store.record(self.id).children.is_some()
    }
}

/// An ordered sibling list inside a [`CatalogStore`].
#[derive(Debug, Clone, Copy)]
pub struct Entries<'a> {
    store: &'a CatalogStore,
    span: Span,
}

impl<'a> Entries<'a> {
    pub fn len(&self) -> usize {
        self.span.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.span.len == 0
    }

    /// The entry at sibling position `index`.
    pub fn get(&self, index: usize) -> Option<EntryRef<'a>> {
        (index < self.len()).then(|| EntryRef {
            store: self.store,
            id: EntryId(self.span.start + index as u32),
        })
    }

    pub fn iter(&self) -> EntriesIter<'a> {
        EntriesIter {
            store: self.store,
            next: self.span.start,
            end: self.span.start + self.span.len,
        }
    }
}

impl<'a> IntoIterator for Entries<'a> {
    type Item = EntryRef<'a>;
    type IntoIter = EntriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`Entries`] list.
#[derive(Debug, Clone)]
pub struct EntriesIter<'a> {
    store: &'a CatalogStore,
    next: u32,
    end: u32,
}

impl<'a> Iterator for EntriesIter<'a> {
    type Item = EntryRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let id = EntryId(self.next);
        self.next += 1;
        Some(EntryRef {
            store: self.store,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EntriesIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::branch(
                "A",
                Some("a.html"),
                vec![
                    CatalogEntry::leaf("B", "b.html"),
                    CatalogEntry::branch("C", None, vec![CatalogEntry::leaf("D", "d.html")]),
                ],
            ),
            CatalogEntry::leaf("E", "e.html"),
        ]
    }

    #[test]
    fn test_store_preserves_order() {
        let store = CatalogStore::new(sample());
        let labels: Vec<_> = store.roots().iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["A", "E"]);

        let a = store.roots().get(0).unwrap();
        let children: Vec<_> = a.children().unwrap().iter().map(|e| e.label()).collect();
        assert_eq!(children, vec!["B", "C"]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_store_leaf_and_empty_branch() {
        let store = CatalogStore::new(vec![
            CatalogEntry::leaf("Leaf", "leaf.html"),
            CatalogEntry::branch("Empty", None, Vec::new()),
        ]);
        let leaf = store.roots().get(0).unwrap();
        let empty = store.roots().get(1).unwrap();

        assert!(!leaf.is_expandable());
        assert!(leaf.children().is_none());
        assert!(empty.is_expandable());
        assert!(empty.children().unwrap().is_empty());
        assert_eq!(empty.link(), None);
    }

    #[test]
    fn test_entry_lookup_out_of_range() {
        let store = CatalogStore::new(sample());
        assert!(store.entry(EntryId(99)).is_none());
        assert!(store.roots().get(2).is_none());
    }

    #[test]
    fn test_from_json_tuple_form() {
        let store = CatalogStore::from_json(
            r#"[["Main", "index.html", [["Classes", "annotated.html", null]]]]"#,
        )
        .unwrap();
        let main = store.roots().get(0).unwrap();
        assert_eq!(main.link(), Some("index.html"));
        let classes = main.children().unwrap().get(0).unwrap();
        assert_eq!(classes.label(), "Classes");
        assert!(!classes.is_expandable());
    }

    #[test]
    fn test_from_json_rejects_empty_label() {
        let result = CatalogStore::from_json(r#"[["Main", null, [["", "x.html", null]]]]"#);
        assert!(matches!(
            result,
            Err(CatalogError::EmptyLabel { ref path }) if path == &vec![0, 0]
        ));
    }

    #[test]
    fn test_from_script_ignores_trailing_code() {
        let script = r#"var NAVTREE =
[
  [ "KaRL", "index.html", [
    [ "Class List", "annotated.html", null ]
  ] ]
];

function findNavTreePage(url, data)
{
  var d = data[0];
  return d[1] == url ? [] : null;
}
"#;
        let store = CatalogStore::from_script(script).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.roots().get(0).unwrap().label(), "KaRL");
    }

    #[test]
    fn test_tree_literal_skips_brackets_in_strings() {
        let text = r#"var T = [["a]b", "x[1].html", null]]; f(x[0]);"#;
        assert_eq!(tree_literal(text), Some(r#"[["a]b", "x[1].html", null]]"#));
    }

    #[test]
    fn test_from_script_without_literal() {
        let result = CatalogStore::from_script("var NAVTREE = null;");
        assert!(matches!(result, Err(CatalogError::MissingTree)));
    }
}
