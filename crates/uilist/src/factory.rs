// Item factory - typed construction of list items from live handles
//
// Replaces the runtime type-name reflection of classical page-object
// frameworks with a factory registered per list at construction time, so a
// missing constructor is a compile error rather than a caught reflection
// failure. The per-item contract is unchanged: a factory may fail for one
// element, and the list skips that element instead of aborting the rebuild.

use crate::backend::Element;
use crate::error::Result;
use std::sync::Arc;

/// Builds one typed item from one live element handle.
///
/// Implemented for free by any `Fn(Arc<dyn Element>) -> Result<T>` closure:
///
/// ```ignore
/// let list = ElementList::new("Fruits", query)
///     .with_factory(|root| Ok(GenericRow::new(root)));
/// ```
pub trait ItemFactory<T>: Send + Sync {
    fn build(&self, root: Arc<dyn Element>) -> Result<T>;
}

impl<T, F> ItemFactory<T> for F
where
    F: Fn(Arc<dyn Element>) -> Result<T> + Send + Sync,
{
    fn build(&self, root: Arc<dyn Element>) -> Result<T> {
        self(root)
    }
}
