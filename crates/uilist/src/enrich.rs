// Metadata enrichment seam
//
// After the factory builds an item, registered enrichers run over it once
// per rebuild: resolving declared sub-element locators against the item's
// root, wiring parent-widget links, attaching role metadata. Their internals
// belong to the owning test framework; the list only requires idempotence,
// because an unchanged fingerprint can still lead to re-enrichment after an
// explicit invalidate().

use crate::error::Result;
use async_trait::async_trait;

/// One enrichment pass over a freshly constructed item.
///
/// Must be idempotent: the list may invoke it again for an equivalent item
/// on a later rebuild. An enrichment failure is logged and the item kept.
#[async_trait]
pub trait Enricher<T>: Send + Sync {
    async fn enrich(&self, item: &mut T) -> Result<()>;
}
