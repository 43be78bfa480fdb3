// ElementList - self-refreshing typed collection of UI components
//
// The central piece of the crate. An ElementList owns a live query and a
// typed item factory; every lookup and assertion implicitly resynchronizes
// the materialized items against the current document ("lazy build"), polls
// its predicate, and retries on a configured budget before reporting and
// failing.
//
// Key characteristics:
// - Lazy: nothing is queried until the first operation runs
// - Wholesale rebuild: on a fingerprint mismatch the item list is discarded
//   and reconstructed, never patched in place
// - Per-item tolerance: one malformed element never blinds the test to the
//   rest of the list
//
// Not safe for concurrent use: every operation takes &mut self and the list
// is meant to be driven by the single thread owning the browser session.
// Suspension happens only at the retry sleeps and backend round-trips.

use crate::backend::{Element, ElementQuery};
use crate::config::RetryPolicy;
use crate::enrich::Enricher;
use crate::error::{Error, Result};
use crate::factory::ItemFactory;
use crate::fingerprint::fingerprint;
use crate::item::{ListItem, NameResolver, ParentRef};
use crate::report::{self, NoopReporter, Phrases, Reporter, StepStatus};
use std::sync::Arc;

/// How a lookup compares a candidate item identifier against the target.
#[derive(Clone, Copy, Debug)]
enum Match<'a> {
    Exact(&'a str),
    Partial(&'a str),
}

impl Match<'_> {
    fn accepts(&self, id: &str) -> bool {
        match self {
            Match::Exact(target) => id == *target,
            Match::Partial(fragment) => id.contains(fragment),
        }
    }

    fn describe(&self, visible_only: bool) -> String {
        let base = match self {
            Match::Exact(target) => format!("id == '{target}'"),
            Match::Partial(fragment) => format!("id contains '{fragment}'"),
        };
        if visible_only {
            format!("{base}, visible")
        } else {
            base
        }
    }
}

/// A typed, lazily rebuilt collection of item wrappers over a live query.
///
/// The materialized items mirror the most recent query evaluation in length
/// and order (minus elements whose construction failed). A cheap content
/// fingerprint decides whether a refresh actually rebuilds; see
/// [`crate::fingerprint::fingerprint`] for the documented collision
/// tradeoff.
///
/// Stale recovery is single-shot per list instance: the first stale-handle
/// failure forces one resynchronization and one retry, and any stale failure
/// after that propagates for the rest of the list's lifetime.
pub struct ElementList<T: ListItem> {
    name: String,
    query: Arc<dyn ElementQuery>,
    factory: Option<Arc<dyn ItemFactory<T>>>,
    items: Vec<T>,
    last_fingerprint: String,
    built: bool,
    parent: Option<ParentRef>,
    name_resolver: Option<NameResolver>,
    enrichers: Vec<Arc<dyn Enricher<T>>>,
    retry: Arc<RetryPolicy>,
    reporter: Arc<dyn Reporter>,
    phrases: Phrases,
    stale_retry_used: bool,
}

impl<T: ListItem> ElementList<T> {
    /// Creates an unbuilt list over a query. A factory must be registered
    /// with [`with_factory`](Self::with_factory) before the first operation.
    pub fn new(name: impl Into<String>, query: Arc<dyn ElementQuery>) -> Self {
        Self {
            name: name.into(),
            query,
            factory: None,
            items: Vec::new(),
            last_fingerprint: String::new(),
            built: false,
            parent: None,
            name_resolver: None,
            enrichers: Vec::new(),
            retry: Arc::new(RetryPolicy::default()),
            reporter: Arc::new(NoopReporter),
            phrases: Phrases::default(),
            stale_retry_used: false,
        }
    }

    /// Registers the typed item factory as a plain constructor closure.
    pub fn with_factory(
        mut self,
        factory: impl Fn(Arc<dyn Element>) -> Result<T> + Send + Sync + 'static,
    ) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Registers a hand-implemented [`ItemFactory`].
    pub fn with_item_factory(mut self, factory: impl ItemFactory<T> + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Shares a retry policy with this list. Values are re-read on every
    /// poll iteration, so runtime changes take effect mid-operation.
    pub fn with_retry_policy(mut self, retry: Arc<RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// Installs the report sink consumed on failed lookups/assertions.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replaces the step phrase templates (e.g. with localized ones).
    pub fn with_phrases(mut self, phrases: Phrases) -> Self {
        self.phrases = phrases;
        self
    }

    /// Records the list's own parent stand-in, used only for step text.
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Installs the name-derivation method handed to every built item.
    pub fn with_name_resolver(mut self, resolver: NameResolver) -> Self {
        self.name_resolver = Some(resolver);
        self
    }

    /// Registers a metadata enricher, run once per item per rebuild.
    pub fn with_enricher(mut self, enricher: impl Enricher<T> + 'static) -> Self {
        self.enrichers.push(Arc::new(enricher));
        self
    }

    /// The list's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The list's parent stand-in, if any.
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    /// Whether at least one materialization has succeeded.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The materialized items as of the last successful refresh. Does not
    /// resynchronize; use the lookup operations for live reads.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Forces the next [`refresh`](Self::refresh) to rebuild even if the
    /// fingerprint is unchanged.
    pub fn invalidate(&mut self) {
        self.built = false;
    }

    /// Resynchronizes the materialized items with the live query.
    ///
    /// Evaluates the query, fingerprints the result, and rebuilds the item
    /// list only on a mismatch (or when the list was never built or has been
    /// invalidated). Elements whose construction fails are skipped with a
    /// warning; only a missing factory is a hard error, and in that case the
    /// previously materialized items are left untouched.
    pub async fn refresh(&mut self) -> Result<()> {
        let factory = self.factory.clone().ok_or_else(|| {
            Error::Configuration(format!(
                "list '{}' has no item factory registered",
                self.name
            ))
        })?;

        let elements = self.query.evaluate().await?;
        let current = fingerprint(&elements).await?;
        if self.built && current == self.last_fingerprint {
            tracing::debug!(list = %self.name, "fingerprint unchanged, rebuild skipped");
            return Ok(());
        }

        self.last_fingerprint = current;
        self.items.clear();
        for element in elements {
            let mut item = match factory.build(Arc::clone(&element)) {
                Ok(item) => item,
                Err(err) => {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "item construction failed, element skipped"
                    );
                    continue;
                }
            };

            if let Some(resolver) = &self.name_resolver {
                item.meta_mut().set_name_resolver(Arc::clone(resolver));
            }

            match element.exists().await {
                Ok(true) => match item.id().await {
                    Ok(id) => {
                        let display = item.meta().resolve_name(&id);
                        item.meta_mut().set_element_name(display);
                    }
                    Err(err) => {
                        tracing::warn!(
                            list = %self.name,
                            error = %err,
                            "identifier unreadable, display name not assigned"
                        );
                    }
                },
                _ => {
                    tracing::warn!(
                        list = %self.name,
                        "element no longer attached, display name not assigned"
                    );
                }
            }

            item.meta_mut().set_parent(ParentRef::list(self.name.clone()));

            for enricher in &self.enrichers {
                if let Err(err) = enricher.enrich(&mut item).await {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "enrichment failed, item kept"
                    );
                }
            }

            self.items.push(item);
        }
        self.built = true;
        Ok(())
    }

    /// Number of materialized items after a resynchronization.
    pub async fn size(&mut self) -> Result<usize> {
        self.refresh().await?;
        Ok(self.items.len())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// First item whose identifier contains `fragment`. Retries on the
    /// configured budget; exhaustion is reported and fails.
    pub async fn get(&mut self, fragment: &str) -> Result<&T> {
        let idx = self.wait_for_match(Match::Partial(fragment), false).await?;
        Ok(&self.items[idx])
    }

    /// First item whose identifier equals `id` exactly.
    pub async fn get_precise(&mut self, id: &str) -> Result<&T> {
        let idx = self.wait_for_match(Match::Exact(id), false).await?;
        Ok(&self.items[idx])
    }

    /// First currently displayed item whose identifier contains `fragment`.
    pub async fn get_visible(&mut self, fragment: &str) -> Result<&T> {
        let idx = self.wait_for_match(Match::Partial(fragment), true).await?;
        Ok(&self.items[idx])
    }

    /// First currently displayed item whose identifier equals `id` exactly.
    pub async fn get_precise_visible(&mut self, id: &str) -> Result<&T> {
        let idx = self.wait_for_match(Match::Exact(id), true).await?;
        Ok(&self.items[idx])
    }

    /// Like [`get`](Self::get) but exhaustion yields `None` instead of a
    /// reported failure.
    pub async fn try_get(&mut self, fragment: &str) -> Result<Option<&T>> {
        let matcher = Match::Partial(fragment);
        let mut attempt = 0u32;
        let mut found = None;
        loop {
            self.refresh().await?;
            if let Some(idx) = self.position_of(matcher, false).await {
                found = Some(idx);
                break;
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Ok(found.map(|idx| &self.items[idx]))
    }

    /// Every item whose identifier contains `fragment`. Retries until at
    /// least one match or the budget is spent; an empty result is not a
    /// failure.
    pub async fn get_all(&mut self, fragment: &str) -> Result<Vec<&T>> {
        let idxs = self.wait_for_any(Match::Partial(fragment)).await?;
        Ok(idxs.into_iter().map(|idx| &self.items[idx]).collect())
    }

    /// Every item whose identifier equals `id` exactly; empty result is not
    /// a failure.
    pub async fn get_all_precise(&mut self, id: &str) -> Result<Vec<&T>> {
        let idxs = self.wait_for_any(Match::Exact(id)).await?;
        Ok(idxs.into_iter().map(|idx| &self.items[idx]).collect())
    }

    /// Item at position `index`, retrying until the list is long enough.
    pub async fn nth(&mut self, index: usize) -> Result<&T> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if index < self.items.len() {
                return Ok(&self.items[index]);
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// First materialized item.
    pub async fn first(&mut self) -> Result<&T> {
        self.nth(0).await
    }

    /// Last materialized item.
    pub async fn last(&mut self) -> Result<&T> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if !self.items.is_empty() {
                let idx = self.items.len() - 1;
                return Ok(&self.items[idx]);
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(Error::IndexOutOfRange { index: 0, len: 0 })
    }

    /// Whether a currently displayed item with exactly this identifier
    /// exists. One resynchronization, no internal retry.
    pub async fn has_item(&mut self, id: &str) -> Result<bool> {
        self.refresh().await?;
        Ok(self.position_of(Match::Exact(id), true).await.is_some())
    }

    /// Whether a currently displayed item whose visible text contains `text`
    /// exists. One resynchronization, no internal retry.
    pub async fn has_item_with_text(&mut self, text: &str) -> Result<bool> {
        self.refresh().await?;
        for item in &self.items {
            let matches = match item.root().visible_text().await {
                Ok(t) => t.contains(text),
                Err(err) => {
                    tracing::warn!(list = %self.name, error = %err, "item text unreadable, skipped");
                    continue;
                }
            };
            if !matches {
                continue;
            }
            match item.root().is_displayed().await {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(list = %self.name, error = %err, "item visibility unreadable, skipped");
                }
            }
        }
        Ok(false)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Clicks the first item whose identifier contains `fragment`.
    ///
    /// The one live-handle operation the list performs itself, and the one
    /// routed through stale recovery: the first stale failure in the list's
    /// lifetime forces a resynchronization and a single retry, any later
    /// stale failure propagates.
    pub async fn click(&mut self, fragment: &str) -> Result<()> {
        let idx = self.wait_for_match(Match::Partial(fragment), false).await?;
        let root = Arc::clone(self.items[idx].root());
        match root.click().await {
            Err(err) if err.is_stale() && !self.stale_retry_used => {
                self.stale_retry_used = true;
                tracing::warn!(
                    list = %self.name,
                    error = %err,
                    "stale element during click, forcing one resynchronization"
                );
                self.invalidate();
                self.refresh().await?;
                let idx = self
                    .position_of(Match::Partial(fragment), false)
                    .await
                    .ok_or_else(|| {
                        Error::ElementNotFound(format!(
                            "item matching '{fragment}' disappeared from list '{}' during stale recovery",
                            self.name
                        ))
                    })?;
                self.items[idx].root().click().await
            }
            other => other,
        }
    }

    // ------------------------------------------------------------------
    // Assertions
    // ------------------------------------------------------------------

    /// Asserts the list materializes exactly `expected` items.
    ///
    /// Asserting `0` degrades gracefully: a query-level "element not found"
    /// mid-poll counts as zero items instead of erroring out.
    pub async fn assert_size(&mut self, expected: usize) -> Result<()> {
        let mut attempt = 0u32;
        let mut actual;
        loop {
            match self.refresh().await {
                Ok(()) => actual = self.items.len(),
                Err(Error::ElementNotFound(_)) if expected == 0 => actual = 0,
                Err(err) => return Err(err),
            }
            if actual == expected {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.size_assertion,
            &format!("== {expected}"),
            format!(
                "expected list '{}' to have {expected} item(s), found {actual}",
                self.name
            ),
        ))
    }

    /// Asserts the list materializes no items.
    pub async fn assert_empty(&mut self) -> Result<()> {
        self.assert_size(0).await
    }

    /// Asserts the list materializes more than `than` items. A negative
    /// `than` is a programming error and fails immediately.
    pub async fn assert_size_greater_than(&mut self, than: i64) -> Result<()> {
        if than < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative expected size: {than}"
            )));
        }
        let mut attempt = 0u32;
        let mut actual;
        loop {
            self.refresh().await?;
            actual = self.items.len();
            if actual as i64 > than {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.size_assertion,
            &format!("> {than}"),
            format!(
                "expected list '{}' to have more than {than} item(s), found {actual}",
                self.name
            ),
        ))
    }

    /// Asserts the list materializes fewer than `than` items. A negative
    /// `than` is a programming error and fails immediately.
    pub async fn assert_size_less_than(&mut self, than: i64) -> Result<()> {
        if than < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative expected size: {than}"
            )));
        }
        let mut attempt = 0u32;
        let mut actual;
        loop {
            self.refresh().await?;
            actual = self.items.len();
            if (actual as i64) < than {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.size_assertion,
            &format!("< {than}"),
            format!(
                "expected list '{}' to have fewer than {than} item(s), found {actual}",
                self.name
            ),
        ))
    }

    /// Asserts at least one item is currently displayed.
    pub async fn assert_any_visible(&mut self) -> Result<()> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if self.any_visible().await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.visibility_assertion,
            "at least one item visible",
            format!("expected at least one visible item in list '{}'", self.name),
        ))
    }

    /// Asserts no item is currently displayed.
    pub async fn assert_none_visible(&mut self) -> Result<()> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if !self.any_visible().await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.visibility_assertion,
            "no item visible",
            format!("expected no visible item in list '{}'", self.name),
        ))
    }

    /// Asserts some item's visible text contains `text`.
    pub async fn assert_some_contains_text(&mut self, text: &str) -> Result<()> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if self.any_text(|t| t.contains(text)).await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.text_assertion,
            &format!("some item contains '{text}'"),
            format!(
                "expected some item of list '{}' to contain '{text}'",
                self.name
            ),
        ))
    }

    /// Asserts no item's visible text contains `text`.
    pub async fn assert_none_contains_text(&mut self, text: &str) -> Result<()> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if !self.any_text(|t| t.contains(text)).await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.text_assertion,
            &format!("no item contains '{text}'"),
            format!(
                "expected no item of list '{}' to contain '{text}'",
                self.name
            ),
        ))
    }

    /// Asserts some item's visible text matches the regex `pattern`. An
    /// invalid pattern fails immediately.
    pub async fn assert_some_matches(&mut self, pattern: &str) -> Result<()> {
        let re = regex::Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("Invalid regex: {e}")))?;
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if self.any_text(|t| re.is_match(t)).await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.text_assertion,
            &format!("some item matches /{pattern}/"),
            format!(
                "expected some item of list '{}' to match /{pattern}/",
                self.name
            ),
        ))
    }

    /// Asserts no item's visible text matches the regex `pattern`. An
    /// invalid pattern fails immediately.
    pub async fn assert_none_matches(&mut self, pattern: &str) -> Result<()> {
        let re = regex::Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("Invalid regex: {e}")))?;
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if !self.any_text(|t| re.is_match(t)).await {
                return Ok(());
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        Err(self.assertion_failure(
            &self.phrases.text_assertion,
            &format!("no item matches /{pattern}/"),
            format!(
                "expected no item of list '{}' to match /{pattern}/",
                self.name
            ),
        ))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Position of the first item satisfying the matcher. Items whose
    /// identifier or visibility is unreadable are skipped with a warning,
    /// never propagated.
    async fn position_of(&self, matcher: Match<'_>, visible_only: bool) -> Option<usize> {
        for (idx, item) in self.items.iter().enumerate() {
            let id = match item.id().await {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "item identifier unreadable during lookup, skipped"
                    );
                    continue;
                }
            };
            if !matcher.accepts(&id) {
                continue;
            }
            if visible_only {
                match item.root().is_displayed().await {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        tracing::warn!(
                            list = %self.name,
                            error = %err,
                            "item visibility unreadable during lookup, skipped"
                        );
                        continue;
                    }
                }
            }
            return Some(idx);
        }
        None
    }

    /// Positions of all items satisfying the matcher, in list order.
    async fn positions_of(&self, matcher: Match<'_>) -> Vec<usize> {
        let mut out = Vec::new();
        for (idx, item) in self.items.iter().enumerate() {
            match item.id().await {
                Ok(id) if matcher.accepts(&id) => out.push(idx),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "item identifier unreadable during lookup, skipped"
                    );
                }
            }
        }
        out
    }

    /// Uniform retrying lookup. On exhaustion reports a FAILED step and
    /// returns an assertion failure naming the list and the criterion.
    async fn wait_for_match(&mut self, matcher: Match<'_>, visible_only: bool) -> Result<usize> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            if let Some(idx) = self.position_of(matcher, visible_only).await {
                return Ok(idx);
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                break;
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
        let criterion = matcher.describe(visible_only);
        Err(self.assertion_failure(
            &self.phrases.item_lookup,
            &criterion,
            format!("no item matching {criterion} in list '{}'", self.name),
        ))
    }

    /// Retrying multi-lookup: returns as soon as anything matches, or an
    /// empty set once the budget is spent (not a failure).
    async fn wait_for_any(&mut self, matcher: Match<'_>) -> Result<Vec<usize>> {
        let mut attempt = 0u32;
        loop {
            self.refresh().await?;
            let idxs = self.positions_of(matcher).await;
            if !idxs.is_empty() {
                return Ok(idxs);
            }
            attempt += 1;
            if attempt >= self.retry.retry_amount() {
                return Ok(Vec::new());
            }
            tokio::time::sleep(self.retry.retry_interval()).await;
        }
    }

    async fn any_visible(&self) -> bool {
        for item in &self.items {
            match item.root().is_displayed().await {
                Ok(true) => return true,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "item visibility unreadable, skipped"
                    );
                }
            }
        }
        false
    }

    async fn any_text(&self, predicate: impl Fn(&str) -> bool) -> bool {
        for item in &self.items {
            match item.root().visible_text().await {
                Ok(text) if predicate(&text) => return true,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        list = %self.name,
                        error = %err,
                        "item text unreadable, skipped"
                    );
                }
            }
        }
        false
    }

    /// Emits the FAILED step for an exhausted retry budget and builds the
    /// user-visible assertion error.
    fn assertion_failure(&self, phrase: &str, criterion: &str, detail: String) -> Error {
        let step = report::render(
            phrase,
            &[("list", self.name.as_str()), ("criterion", criterion)],
        );
        self.reporter.start_step(&step);
        self.reporter.stop_step(StepStatus::Failed);
        Error::AssertionFailed(detail)
    }
}

impl<T: ListItem> std::fmt::Debug for ElementList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementList")
            .field("name", &self.name)
            .field("built", &self.built)
            .field("items", &self.items.len())
            .field("fingerprint", &self.last_fingerprint)
            .finish()
    }
}
