//! Lazy, navigable outline view over a large hierarchical catalog.
//!
//! The catalog is loaded once into a [`CatalogStore`]. A [`NavTree`] then
//! materializes rows on demand as branches are expanded, keeps each row's
//! connector glyphs consistent, and can jump to and reveal any entry by its
//! link. All drawing goes through a [`HostSurface`] supplied by the caller.
//!
//! # Example
//!
//! ```ignore
//! use navtree::{CatalogStore, NavTree, NavTreeConfig};
//!
//! let store = CatalogStore::load("html/navtree.js")?;
//! let mut tree = NavTree::new(store, NavTreeConfig::default());
//!
//! // Once the host surface exists:
//! tree.initialize(&mut surface, "annotated.html");
//!
//! // Once the host has laid everything out:
//! tree.surface_loaded(&mut surface);
//!
//! // On every click on an expand toggle:
//! tree.toggle(&mut surface, row);
//! ```

pub mod breadcrumb;
pub mod catalog;
pub mod config;
pub mod error;
pub mod glyph;
pub mod node;
pub mod surface;

mod controller;
mod reveal;

pub use breadcrumb::{BreadcrumbPath, resolve, resolve_with_fallback};
pub use catalog::{CatalogEntry, CatalogStore, Entries, EntriesIter, EntryId, EntryRef};
pub use config::NavTreeConfig;
pub use controller::{NavTree, VisibleRow};
pub use error::{CatalogError, ConfigError};
pub use glyph::{GlyphKind, RowIcon, connector, glyph, glyph_at, indent, row_icons};
pub use node::{ExpandState, LiveNode, NodeArena, NodeId};
pub use surface::{HostSurface, RowLabel, Transition, Viewport};
