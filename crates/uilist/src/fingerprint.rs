// Fingerprinting - cheap change detection over an evaluated element set
//
// A rebuild is the expensive path (one query round-trip plus N constructions
// plus N enrichment passes), so refresh() first summarizes the live set and
// skips the rebuild when the summary matches the last one.

use crate::backend::Element;
use crate::error::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Computes a content fingerprint over an evaluated element set.
///
/// One pass, no per-element construction work: each element contributes its
/// `id` attribute (or nothing) plus its visible text; the concatenation is
/// hashed. The empty set yields a stable value.
///
/// Best-effort by design: this is a weak hash, and two structurally
/// different sets that collide (e.g. two elements swapping positions with
/// identical text) will incorrectly skip a rebuild. The optimization is a
/// speed/correctness tradeoff, not a correctness guarantee.
pub async fn fingerprint(elements: &[Arc<dyn Element>]) -> Result<String> {
    let mut acc = String::new();
    for element in elements {
        match element.id_attribute().await {
            Ok(Some(id)) => acc.push_str(&id),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "element unreadable during fingerprint pass, skipped");
                continue;
            }
        }
        match element.visible_text().await {
            Ok(text) => acc.push_str(&text),
            Err(err) => {
                tracing::warn!(error = %err, "element text unreadable during fingerprint pass, skipped");
            }
        }
    }

    let mut hasher = DefaultHasher::new();
    acc.hash(&mut hasher);
    Ok(format!("{:016x}", hasher.finish()))
}
