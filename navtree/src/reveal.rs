//! Initial jump-to-and-reveal.

use crate::breadcrumb::{BreadcrumbPath, resolve_with_fallback};
use crate::controller::NavTree;
use crate::node::NodeId;
use crate::surface::HostSurface;

impl NavTree {
    /// Draw the top-level rows and reveal `target`.
    ///
    /// Call once, when the host surface exists. Returns the selected row.
    pub fn initialize<S: HostSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: &str,
    ) -> Option<NodeId> {
        log::debug!("Initializing outline for {target:?}");
        self.open_root(surface);
        self.reveal(surface, target)
    }

    /// Resolve `target`, falling back to the configured default target.
    pub fn resolve(&self, target: &str) -> Option<BreadcrumbPath> {
        resolve_with_fallback(
            target,
            self.config.default_target.as_deref(),
            self.store.roots(),
        )
    }

    /// Expand every row on the path to `target` and select it.
    ///
    /// Expansion is immediate so the whole path is open before the host's
    /// "fully loaded" signal. If neither `target` nor the default target is
    /// in the catalog, nothing is expanded or selected.
    pub fn reveal<S: HostSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: &str,
    ) -> Option<NodeId> {
        let path = self.resolve(target)?;
        if path.is_empty() {
            return None;
        }
        self.open_root(surface);

        let mut current = NodeId::ROOT;
        for &index in path.indices() {
            self.force_expand(surface, current, true);
            let Some(child) = self.nodes.child_at(current, index) else {
                log::warn!("Breadcrumb {path} has no row at index {index} under {current}");
                return None;
            };
            current = child;
        }
        self.force_expand(surface, current, true);
        self.select(surface, current);
        Some(current)
    }

    /// The host's "surface fully loaded" signal: center the revealed row.
    pub fn surface_loaded<S: HostSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.selected.is_some() {
            self.recenter(surface);
        }
    }

    /// Build the top-level rows and show the root container, once.
    fn open_root<S: HostSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.nodes.root().is_expanded() {
            return;
        }
        self.force_expand(surface, NodeId::ROOT, true);
    }
}
