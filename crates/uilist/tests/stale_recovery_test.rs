// Integration tests for the single-shot stale-reference recovery

mod common;

use fake_dom::FakeDom;
use std::sync::Arc;
use std::time::Duration;
use uilist::{ElementList, GenericRow, RetryPolicy};

fn list_over(dom: &FakeDom) -> ElementList<GenericRow> {
    ElementList::new("Fruits", dom.query())
        .with_factory(|root| Ok(GenericRow::new(root)))
        .with_retry_policy(Arc::new(RetryPolicy::new(3, Duration::from_millis(20))))
}

#[tokio::test]
async fn test_first_stale_failure_recovers_transparently() {
    common::init_tracing();
    let dom = FakeDom::new();
    let apple = dom.push("Apple");
    dom.set_stale_clicks(apple, 1);

    let mut list = list_over(&dom);
    list.click("Apple").await.unwrap();

    // One successful click landed after the forced resynchronization.
    assert_eq!(dom.clicks(), vec![apple]);
}

#[tokio::test]
async fn test_two_stale_failures_in_direct_succession_propagate() {
    common::init_tracing();
    let dom = FakeDom::new();
    let apple = dom.push("Apple");
    dom.set_stale_clicks(apple, 2);

    let mut list = list_over(&dom);
    let err = list.click("Apple").await.unwrap_err();
    assert!(err.is_stale(), "got: {err:?}");
    assert!(dom.clicks().is_empty());
}

#[tokio::test]
async fn test_recovery_budget_is_per_instance_not_per_call() {
    common::init_tracing();
    let dom = FakeDom::new();
    let apple = dom.push("Apple");

    let mut list = list_over(&dom);

    // First stale event: recovered.
    dom.set_stale_clicks(apple, 1);
    list.click("Apple").await.unwrap();

    // A later, unrelated stale event is no longer eligible: the flag stays
    // set for the rest of the list's lifetime.
    dom.set_stale_clicks(apple, 1);
    let err = list.click("Apple").await.unwrap_err();
    assert!(err.is_stale(), "got: {err:?}");

    // Only the first recovery's click ever landed.
    assert_eq!(dom.clicks(), vec![apple]);
}

#[tokio::test]
async fn test_healthy_clicks_do_not_consume_the_budget() {
    common::init_tracing();
    let dom = FakeDom::new();
    let apple = dom.push("Apple");

    let mut list = list_over(&dom);
    list.click("Apple").await.unwrap();
    list.click("Apple").await.unwrap();

    // The budget is still available for the first actual stale event.
    dom.set_stale_clicks(apple, 1);
    list.click("Apple").await.unwrap();

    assert_eq!(dom.clicks(), vec![apple, apple, apple]);
}

#[tokio::test]
async fn test_stale_items_are_skipped_during_lookups() {
    common::init_tracing();
    let dom = FakeDom::new();
    dom.push("Apple");
    let banana = dom.push("Banana");

    let mut list = list_over(&dom);
    list.refresh().await.unwrap();

    // Replace the node with an identical twin. The content fingerprint is
    // unchanged, so the next refresh keeps the materialized items, and the
    // second item's root is now detached.
    dom.remove(banana);
    dom.push("Banana");

    // The detached item is skipped with a warning, not propagated: the
    // healthy item is still found, and the lookup for the stale one fails
    // as an ordinary not-found, never as a stale error.
    let found = list.get_precise("Apple").await.unwrap();
    drop(found);

    let err = list.get_precise("Banana").await.unwrap_err();
    assert!(matches!(err, uilist::Error::AssertionFailed(_)), "got: {err:?}");
}
