// List item contract - the minimal capability every list item type implements
//
// Items are thin typed wrappers around one live element handle. The list
// enriches them after construction (display name, parent stand-in, name
// resolver); implementors only provide the root handle and embed an ItemMeta
// for the bookkeeping, in the same base-struct style the driver objects use.

use crate::backend::Element;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Maps a derived identifier to the display name assigned to an item.
///
/// The default resolver is the identity function; a list can install a
/// different one (e.g. to prefix names with the screen they belong to).
pub type NameResolver = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Non-owning stand-in for the entity an item (or a list) belongs to.
///
/// Used only to compose human-readable step text ("item of list X"); it
/// carries no lifecycle: the list does not own its parent and the parent
/// does not own the list's items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentRef {
    pub name: String,
    pub kind: &'static str,
}

impl ParentRef {
    /// Stand-in for a list, as attached to every materialized item.
    pub fn list(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "list",
        }
    }
}

/// Metadata the list wires into every item after construction.
///
/// Every setter may be called zero or more times before first read.
#[derive(Clone, Default)]
pub struct ItemMeta {
    element_name: Option<String>,
    parent: Option<ParentRef>,
    name_resolver: Option<NameResolver>,
}

impl ItemMeta {
    pub fn element_name(&self) -> Option<&str> {
        self.element_name.as_deref()
    }

    pub fn set_element_name(&mut self, name: impl Into<String>) {
        self.element_name = Some(name.into());
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    pub fn name_resolver(&self) -> Option<&NameResolver> {
        self.name_resolver.as_ref()
    }

    pub fn set_name_resolver(&mut self, resolver: NameResolver) {
        self.name_resolver = Some(resolver);
    }

    /// Runs the derived identifier through the installed resolver, if any.
    pub(crate) fn resolve_name(&self, id: &str) -> String {
        match &self.name_resolver {
            Some(resolver) => resolver(id),
            None => id.to_string(),
        }
    }
}

impl std::fmt::Debug for ItemMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemMeta")
            .field("element_name", &self.element_name)
            .field("parent", &self.parent)
            .field("has_name_resolver", &self.name_resolver.is_some())
            .finish()
    }
}

/// The capability every list item type must implement.
///
/// An item is never mutated after the list finishes wiring it; when the
/// underlying element set changes the list discards and rebuilds items
/// wholesale rather than patching them in place.
#[async_trait]
pub trait ListItem: Send + Sync {
    /// The live handle this item wraps.
    fn root(&self) -> &Arc<dyn Element>;

    fn meta(&self) -> &ItemMeta;

    fn meta_mut(&mut self) -> &mut ItemMeta;

    /// Stable, content-derived identifier.
    ///
    /// Must be deterministic for identical element content. The default
    /// derivation is the root's visible text; the caller is responsible for
    /// catching errors from a detached root.
    async fn id(&self) -> Result<String> {
        self.root().visible_text().await
    }
}

/// Ready-made item whose identifier is the element's visible text.
///
/// Covers the common case of simple rows/cards; richer screens define their
/// own item types with sub-locators and override `id()` as needed.
#[derive(Clone)]
pub struct GenericRow {
    root: Arc<dyn Element>,
    meta: ItemMeta,
}

impl GenericRow {
    pub fn new(root: Arc<dyn Element>) -> Self {
        Self {
            root,
            meta: ItemMeta::default(),
        }
    }
}

#[async_trait]
impl ListItem for GenericRow {
    fn root(&self) -> &Arc<dyn Element> {
        &self.root
    }

    fn meta(&self) -> &ItemMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ItemMeta {
        &mut self.meta
    }
}

impl std::fmt::Debug for GenericRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericRow").field("meta", &self.meta).finish()
    }
}
