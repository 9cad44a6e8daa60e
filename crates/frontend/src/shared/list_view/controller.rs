use contracts::domain::common::{Draft, Entity};
use contracts::shared::validation::Validate;
use std::cell::RefCell;
use std::rc::Rc;

use super::state::{FilterState, ListState, Matcher, MutationState, Page};
use crate::shared::api_client::ApiClient;
use crate::shared::error::ApiError;

/// Result of an operation that may deliberately do nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    /// Stale load, nothing staged for deletion, or another submit in flight
    Skipped,
    /// The mutation was applied but the follow-up reload failed
    ReloadFailed(ApiError),
}

/// Drives one entity list: fetch, filter, paginate, mutate, reload.
///
/// State lives in a `RefCell` that is never held across an `.await`, so
/// overlapping operations on the same controller are safe on the single
/// browser thread.
pub struct ListViewController<E: Entity> {
    api: ApiClient,
    state: Rc<RefCell<ListState<E>>>,
    on_change: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl<E: Entity> Clone for ListViewController<E> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<E: Entity> ListViewController<E> {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self {
            api,
            state: Rc::new(RefCell::new(ListState::new(page_size))),
            on_change: Rc::new(RefCell::new(None)),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Called after every state change.
    pub fn set_on_change(&self, callback: impl Fn() + 'static) {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Replace the free-text predicate and recompute the visible subset.
    pub fn set_matcher(&self, matcher: Matcher<E>) {
        self.state.borrow_mut().set_matcher(matcher);
        self.notify();
    }

    // ---- reads ----

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().mutation == MutationState::Submitting
    }

    pub fn filter(&self) -> FilterState {
        self.state.borrow().filter.clone()
    }

    pub fn records(&self) -> Vec<E> {
        self.state.borrow().records().to_vec()
    }

    pub fn filtered(&self) -> Vec<E> {
        self.state.borrow().filtered()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state.borrow().categories()
    }

    pub fn find(&self, id: i64) -> Option<E> {
        self.state.borrow().find(id).cloned()
    }

    pub fn page_size(&self) -> usize {
        self.state.borrow().page.size
    }

    pub fn pending_deletion(&self) -> Option<i64> {
        self.state.borrow().pending_deletion
    }

    /// Rows of page `n` of the filtered subset, without moving the current
    /// page. Pages past the end are empty.
    pub fn get_page(&self, n: usize) -> Page<E> {
        self.state.borrow().slice(n)
    }

    pub fn current_page(&self) -> Page<E> {
        self.state.borrow().current()
    }

    // ---- filter & navigation ----

    /// Resets to page 1.
    pub fn apply_filter(&self, query: &str, category: Option<String>) -> Page<E> {
        let page = {
            let mut state = self.state.borrow_mut();
            state.set_filter(FilterState::new(query, category));
            log::debug!(
                "{} filter {:?}: {} of {} shown",
                E::PLURAL,
                state.filter,
                state.filtered_len(),
                state.records().len()
            );
            state.current()
        };
        self.notify();
        page
    }

    /// Recompute the visible subset after lookup data changed.
    pub fn refilter(&self) {
        self.state.borrow_mut().refilter();
        self.notify();
    }

    /// Move to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&self, n: usize) -> Page<E> {
        let page = self.state.borrow_mut().go_to(n);
        self.notify();
        page
    }

    pub fn next_page(&self) -> Page<E> {
        let current = self.state.borrow().page.current;
        self.go_to_page(current + 1)
    }

    pub fn prev_page(&self) -> Page<E> {
        let current = self.state.borrow().page.current;
        self.go_to_page(current.saturating_sub(1))
    }

    // ---- load ----

    /// Fetch the whole collection. A response that arrives after a newer
    /// load was started is dropped and reported as [`Outcome::Skipped`].
    pub async fn load(&self) -> Result<Outcome, ApiError> {
        let ticket = self.state.borrow_mut().issue_ticket();
        log::debug!("Loading {} (ticket {})", E::PLURAL, ticket);

        let listing = match self.api.fetch_collection::<E>().await {
            Ok(listing) => listing,
            Err(e) => {
                log::error!("Failed to load {}: {}", E::PLURAL, e);
                return Err(e);
            }
        };

        {
            let mut state = self.state.borrow_mut();
            if !state.is_latest(ticket) {
                log::debug!(
                    "Dropping stale {} response (ticket {}, latest {})",
                    E::PLURAL,
                    ticket,
                    state.ticket
                );
                return Ok(Outcome::Skipped);
            }
            log::info!("Loaded {} {}", listing.records.len(), E::PLURAL);
            state.replace(listing.records);
        }
        self.notify();
        Ok(Outcome::Done)
    }

    // ---- mutations ----

    /// Validate locally, POST, then reload.
    pub async fn create(&self, draft: E::Draft) -> Result<Outcome, ApiError> {
        if self.is_submitting() {
            return Ok(Outcome::Skipped);
        }
        draft.validate()?;
        self.begin_submit();
        let result = self.api.create::<E>(&draft).await;
        self.finish_mutation("create", result).await
    }

    /// Validate locally, PUT (body carries the id), then reload.
    pub async fn update(&self, id: i64, mut draft: E::Draft) -> Result<Outcome, ApiError> {
        if self.is_submitting() {
            return Ok(Outcome::Skipped);
        }
        draft.set_id(id);
        draft.validate()?;
        self.begin_submit();
        let result = self.api.update::<E>(id, &draft).await;
        self.finish_mutation("update", result).await
    }

    /// Flip the active flag of entities that have one, then reload.
    pub async fn set_active(&self, id: i64, active: bool) -> Result<Outcome, ApiError> {
        if self.is_submitting() {
            return Ok(Outcome::Skipped);
        }
        self.begin_submit();
        let result = self.api.set_active::<E>(id, active).await;
        self.finish_mutation("status change", result).await
    }

    pub fn stage_deletion(&self, id: i64) {
        self.state.borrow_mut().pending_deletion = Some(id);
        self.notify();
    }

    pub fn cancel_deletion(&self) {
        self.state.borrow_mut().pending_deletion = None;
        self.notify();
    }

    /// Delete `id` if and only if it is the staged target.
    pub async fn remove(&self, id: i64) -> Result<Outcome, ApiError> {
        if self.pending_deletion() != Some(id) {
            log::debug!("Ignoring delete of {} {}: not staged", E::SINGULAR, id);
            return Ok(Outcome::Skipped);
        }
        if self.is_submitting() {
            return Ok(Outcome::Skipped);
        }
        self.begin_submit();
        let result = self.api.delete::<E>(id).await;
        self.state.borrow_mut().pending_deletion = None;
        self.finish_mutation("delete", result).await
    }

    /// Delete whatever the confirmation prompt staged.
    pub async fn confirm_deletion(&self) -> Result<Outcome, ApiError> {
        match self.pending_deletion() {
            Some(id) => self.remove(id).await,
            None => Ok(Outcome::Skipped),
        }
    }

    fn begin_submit(&self) {
        self.state.borrow_mut().mutation = MutationState::Submitting;
        self.notify();
    }

    async fn finish_mutation(
        &self,
        action: &str,
        result: Result<(), ApiError>,
    ) -> Result<Outcome, ApiError> {
        let outcome = match result {
            Ok(()) => {
                log::info!("{} {} succeeded", E::LABEL, action);
                match self.load().await {
                    Ok(_) => Ok(Outcome::Done),
                    Err(e) => {
                        log::warn!("reload after {} {} failed: {}", E::LABEL, action, e);
                        Ok(Outcome::ReloadFailed(e))
                    }
                }
            }
            Err(e) => {
                log::warn!("{} {} failed: {}", E::LABEL, action, e);
                Err(e)
            }
        };
        self.state.borrow_mut().mutation = MutationState::Idle;
        self.notify();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::{Method, Transport};
    use crate::shared::testing::{json_response, text_response, FakeBackend, GatedTransport, BASE_URL};
    use crate::system::auth::storage::Session;
    use contracts::domain::a001_customer::aggregate::{Customer, CustomerDraft};
    use futures::poll;
    use serde_json::json;
    use std::cell::Cell;

    fn controller_over(transport: Rc<dyn Transport>) -> ListViewController<Customer> {
        let api = ApiClient::new(transport, BASE_URL, Session::in_memory());
        ListViewController::new(api, 10)
    }

    fn draft(first: &str, last: &str) -> CustomerDraft {
        CustomerDraft {
            first_name: first.into(),
            last_name: last.into(),
            contact: "0244000000".into(),
            email: String::new(),
            customer_type: "Retailler".into(),
            customer_id: None,
        }
    }

    fn rows(n: i64) -> Vec<serde_json::Value> {
        (1..=n)
            .map(|i| json!({ "customer_id": i, "F_name": format!("Name{}", i), "customer_type": "Retailler" }))
            .collect()
    }

    fn ids(records: &[Customer]) -> Vec<i64> {
        records.iter().map(|c| c.customer_id).collect()
    }

    #[tokio::test]
    async fn test_create_with_empty_name_sends_nothing() {
        let backend = FakeBackend::new();
        let controller = controller_over(backend.clone());

        let err = controller.create(draft("", "Lee")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v.field == "F_name"));
        assert_eq!(backend.request_count(), 0);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_create_then_load_contains_submitted_record() {
        let backend = FakeBackend::new();
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();
        assert!(controller.records().is_empty());

        let outcome = controller.create(draft("Ann", "Lee")).await.unwrap();
        assert_eq!(outcome, Outcome::Done);

        let records = controller.records();
        assert_eq!(records.len(), 1);
        let created = &records[0];
        assert_eq!(created.customer_id, 100);
        assert_eq!(created.first_name.as_deref(), Some("Ann"));
        assert_eq!(created.last_name.as_deref(), Some("Lee"));
        assert_eq!(created.contact.as_deref(), Some("0244000000"));
        assert_eq!(created.customer_type.as_deref(), Some("Retailler"));

        let methods: Vec<_> = backend.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Post, Method::Get]);
    }

    #[tokio::test]
    async fn test_reload_failure_after_create_still_reports_success() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(1));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        backend.fail_after_next(text_response(502, "Bad Gateway"));
        let outcome = controller.create(draft("Ann", "Lee")).await.unwrap();
        assert!(matches!(outcome, Outcome::ReloadFailed(ApiError::Network(_))));
        assert!(!controller.is_submitting());

        // the record was stored; only the refresh is missing
        assert_eq!(backend.rows("customers").len(), 2);
        assert_eq!(ids(&controller.records()), vec![1]);
    }

    #[tokio::test]
    async fn test_update_puts_id_in_path_and_body() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(2));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        controller.update(2, draft("Bo", "Kay")).await.unwrap();
        assert_eq!(
            controller.find(2).and_then(|c| c.last_name),
            Some("Kay".to_string())
        );
        let put = &backend.requests()[1];
        assert!(put.url.ends_with("/customers/editcustomer/2"));
        assert!(put.body.as_deref().unwrap().contains(r#""customer_id":2"#));
    }

    #[tokio::test]
    async fn test_remove_without_staging_is_a_no_op() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(3));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();
        let before = backend.request_count();

        assert_eq!(controller.remove(2).await, Ok(Outcome::Skipped));
        assert_eq!(controller.remove(42).await, Ok(Outcome::Skipped));
        assert_eq!(controller.confirm_deletion().await, Ok(Outcome::Skipped));

        controller.stage_deletion(3);
        assert_eq!(controller.remove(2).await, Ok(Outcome::Skipped));

        assert_eq!(backend.request_count(), before);
        assert_eq!(ids(&controller.records()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_staged_remove_deletes_and_reloads() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(3));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        controller.stage_deletion(2);
        assert_eq!(controller.confirm_deletion().await, Ok(Outcome::Done));
        assert_eq!(ids(&controller.records()), vec![1, 3]);
        assert_eq!(controller.pending_deletion(), None);
    }

    #[tokio::test]
    async fn test_failed_delete_clears_target_and_keeps_records() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(2));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        controller.stage_deletion(1);
        backend.fail_next(json_response(
            409,
            r#"{"success":false,"message":"Customer has sales"}"#,
        ));
        let err = controller.remove(1).await.unwrap_err();
        assert_eq!(err, ApiError::Server("Customer has sales".into()));
        assert_eq!(controller.pending_deletion(), None);
        assert_eq!(ids(&controller.records()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_state_untouched() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(2));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();
        controller.go_to_page(1);
        let before = backend.request_count();

        backend.fail_next(json_response(200, r#"{"success":false}"#));
        let err = controller.create(draft("Ann", "")).await.unwrap_err();
        assert_eq!(err, ApiError::Server("Failed to save customer".into()));

        // no reload after a failure
        assert_eq!(backend.request_count(), before + 1);
        assert_eq!(ids(&controller.records()), vec![1, 2]);
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let backend = FakeBackend::new();
        backend.seed("customers", vec![json!({ "customer_id": 1, "F_name": "Old" })]);
        let gated = GatedTransport::new(backend.clone());
        let controller = controller_over(gated.clone());

        let first_gate = gated.gate();
        let second_gate = gated.gate();

        let mut first = Box::pin(controller.load());
        assert!(poll!(first.as_mut()).is_pending());

        backend.seed("customers", vec![json!({ "customer_id": 2, "F_name": "New" })]);
        let mut second = Box::pin(controller.load());
        assert!(poll!(second.as_mut()).is_pending());

        second_gate.send(()).unwrap();
        assert_eq!(second.await, Ok(Outcome::Done));
        first_gate.send(()).unwrap();
        assert_eq!(first.await, Ok(Outcome::Skipped));

        assert_eq!(ids(&controller.records()), vec![2]);
    }

    #[tokio::test]
    async fn test_second_submit_while_submitting_is_skipped() {
        let backend = FakeBackend::new();
        let gated = GatedTransport::new(backend.clone());
        let controller = controller_over(gated.clone());

        let gate = gated.gate();
        let mut first = Box::pin(controller.create(draft("Ann", "")));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(controller.is_submitting());

        assert_eq!(controller.create(draft("Ann", "")).await, Ok(Outcome::Skipped));

        gate.send(()).unwrap();
        assert_eq!(first.await, Ok(Outcome::Done));
        assert!(!controller.is_submitting());
        assert_eq!(backend.rows("customers").len(), 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_page_clamped_and_filter_resets_it() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(25));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        assert_eq!(controller.go_to_page(3).items.len(), 5);
        controller.load().await.unwrap();
        assert_eq!(controller.current_page().number, 3);

        backend.seed("customers", rows(12));
        controller.load().await.unwrap();
        assert_eq!(controller.current_page().number, 2);

        let page = controller.apply_filter("name1", None);
        assert_eq!(page.number, 1);
        // Name1, Name10, Name11, Name12
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_next_and_prev_stay_in_range() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(15));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        assert_eq!(controller.prev_page().number, 1);
        assert_eq!(controller.next_page().number, 2);
        assert_eq!(controller.next_page().number, 2);
        assert_eq!(controller.get_page(3).items.len(), 0);
        assert_eq!(controller.current_page().number, 2);
    }

    #[tokio::test]
    async fn test_load_error_keeps_previous_collection() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(2));
        let controller = controller_over(backend.clone());
        controller.load().await.unwrap();

        backend.fail_next(text_response(502, "Bad Gateway"));
        let err = controller.load().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(ids(&controller.records()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_changes_are_announced() {
        let backend = FakeBackend::new();
        backend.seed("customers", rows(2));
        let controller = controller_over(backend.clone());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        controller.set_on_change(move || counter.set(counter.get() + 1));

        controller.load().await.unwrap();
        assert_eq!(calls.get(), 1);
        controller.apply_filter("name", None);
        assert_eq!(calls.get(), 2);
    }
}
