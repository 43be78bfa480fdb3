// Integration tests for the synchronization core (refresh)
//
// Covers lazy build, fingerprint-based no-op refresh, wholesale rebuild on
// change, per-item construction-failure tolerance, metadata wiring, and the
// missing-factory configuration error.

mod common;

use fake_dom::FakeDom;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uilist::{
    ElementList, Enricher, Error, GenericRow, ListItem, ParentRef, Result, RetryPolicy,
};

fn fast_policy() -> Arc<RetryPolicy> {
    Arc::new(RetryPolicy::new(3, Duration::from_millis(20)))
}

fn counting_factory(
    counter: Arc<AtomicUsize>,
) -> impl Fn(Arc<dyn uilist::Element>) -> Result<GenericRow> + Send + Sync {
    move |root| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(GenericRow::new(root))
    }
}

#[tokio::test]
async fn test_missing_factory_is_configuration_error() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");

    let mut list: ElementList<GenericRow> = ElementList::new("Fruits", dom.query());
    let err = list.refresh().await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "got: {err:?}");
    assert!(!list.is_built());
    assert!(list.items().is_empty());
}

#[tokio::test]
async fn test_noop_refresh_is_idempotent() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");
    dom.push("Banana");
    dom.push("Cherry");

    let built = Arc::new(AtomicUsize::new(0));
    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(counting_factory(built.clone()))
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    assert!(list.is_built());
    assert_eq!(list.items().len(), 3);
    assert_eq!(built.load(Ordering::SeqCst), 3);

    let ids_before: Vec<String> = collect_ids(&list).await;

    // Unchanged document: second refresh is a fingerprint hit, nothing is
    // reconstructed.
    list.refresh().await.unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 3);
    assert_eq!(collect_ids(&list).await, ids_before);
}

#[tokio::test]
async fn test_rebuild_on_append_preserves_order() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");
    dom.push("Banana");

    let built = Arc::new(AtomicUsize::new(0));
    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(counting_factory(built.clone()))
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    assert_eq!(list.items().len(), 2);

    dom.push("Cherry");
    list.refresh().await.unwrap();

    assert_eq!(list.items().len(), 3);
    // Wholesale rebuild: all three were constructed again.
    assert_eq!(built.load(Ordering::SeqCst), 5);
    assert_eq!(
        collect_ids(&list).await,
        vec!["Apple".to_string(), "Banana".to_string(), "Cherry".to_string()]
    );
}

#[tokio::test]
async fn test_construction_failure_skips_the_element() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");
    dom.push("broken");
    dom.push("Cherry");

    // The second element in document order fails to construct; the rebuild
    // keeps the other two and no error escapes refresh().
    let seen = Arc::new(AtomicUsize::new(0));
    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(move |root: Arc<dyn uilist::Element>| {
            if seen.fetch_add(1, Ordering::SeqCst) == 1 {
                return Err(Error::Backend("constructor rejected element".into()));
            }
            Ok(GenericRow::new(root))
        })
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    assert_eq!(list.items().len(), 2);
    assert_eq!(
        collect_ids(&list).await,
        vec!["Apple".to_string(), "Cherry".to_string()]
    );
}

#[tokio::test]
async fn test_invalidate_forces_rebuild() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");

    let built = Arc::new(AtomicUsize::new(0));
    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(counting_factory(built.clone()))
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    list.refresh().await.unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);

    list.invalidate();
    list.refresh().await.unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_metadata_wiring() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");

    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(|root: Arc<dyn uilist::Element>| Ok(GenericRow::new(root)))
        .with_name_resolver(Arc::new(|id| format!("row '{id}'")))
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    let item = &list.items()[0];
    assert_eq!(item.meta().element_name(), Some("row 'Apple'"));
    assert_eq!(item.meta().parent(), Some(&ParentRef::list("Fruits")));
}

struct CountingEnricher(Arc<AtomicUsize>);

#[async_trait::async_trait]
impl Enricher<GenericRow> for CountingEnricher {
    async fn enrich(&self, _item: &mut GenericRow) -> Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingEnricher;

#[async_trait::async_trait]
impl Enricher<GenericRow> for FailingEnricher {
    async fn enrich(&self, _item: &mut GenericRow) -> Result<()> {
        Err(Error::Backend("sub-locator resolution failed".into()))
    }
}

#[tokio::test]
async fn test_enrichers_run_once_per_item_per_rebuild() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");
    dom.push("Banana");

    let enriched = Arc::new(AtomicUsize::new(0));
    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(|root: Arc<dyn uilist::Element>| Ok(GenericRow::new(root)))
        .with_enricher(CountingEnricher(enriched.clone()))
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    assert_eq!(enriched.load(Ordering::SeqCst), 2);

    // Fingerprint hit: no re-enrichment.
    list.refresh().await.unwrap();
    assert_eq!(enriched.load(Ordering::SeqCst), 2);

    dom.push("Cherry");
    list.refresh().await.unwrap();
    assert_eq!(enriched.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_enrichment_failure_keeps_the_item() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");

    let mut list = ElementList::new("Fruits", dom.query())
        .with_factory(|root: Arc<dyn uilist::Element>| Ok(GenericRow::new(root)))
        .with_enricher(FailingEnricher)
        .with_retry_policy(fast_policy());

    list.refresh().await.unwrap();
    assert_eq!(list.items().len(), 1);
}

async fn collect_ids(list: &ElementList<GenericRow>) -> Vec<String> {
    let mut out = Vec::new();
    for item in list.items() {
        out.push(item.id().await.unwrap());
    }
    out
}
