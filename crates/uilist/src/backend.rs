// Backend seam - narrow async contracts over the browser-automation driver
//
// The list core never talks to a concrete driver. It consumes two small
// trait objects: an Element (one live handle) and an ElementQuery (an
// expression that re-evaluates to the current ordered set of handles).
//
// Implementations must map their driver's stale/detached failures to
// Error::Stale and "no such element" failures to Error::ElementNotFound so
// the recovery and graceful-degrade paths can recognize them.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One live element handle.
///
/// A handle is a snapshot reference: the node it points at can be removed or
/// replaced between calls, in which case operations return `Error::Stale`.
#[async_trait]
pub trait Element: Send + Sync {
    /// The element's `id` attribute, if any.
    async fn id_attribute(&self) -> Result<Option<String>>;

    /// The element's visible (rendered) text.
    async fn visible_text(&self) -> Result<String>;

    /// Whether the element is currently displayed.
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the node still exists in the document. Unlike the other
    /// operations this must not return `Error::Stale` for a detached node.
    async fn exists(&self) -> Result<bool>;

    /// Reads an arbitrary attribute.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Clicks the element.
    async fn click(&self) -> Result<()>;
}

/// A live query: re-evaluates to the present ordered set of matching handles.
#[async_trait]
pub trait ElementQuery: Send + Sync {
    /// Evaluates the query against the current document, in document order.
    async fn evaluate(&self) -> Result<Vec<Arc<dyn Element>>>;

    /// Number of elements currently matching the query.
    async fn count(&self) -> Result<usize> {
        Ok(self.evaluate().await?.len())
    }
}
