use contracts::domain::common::Entity;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::shared::list_utils::Searchable;

/// Free-text predicate used by the filter; defaults to [`Searchable`].
pub type Matcher<E> = Rc<dyn Fn(&E, &str) -> bool>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub query: String,
    /// Exact match on [`Entity::category`]; `None` shows every category
    pub category: Option<String>,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: Option<String>) -> Self {
        Self {
            query: query.into(),
            category: category.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.category.is_some()
    }
}

/// 1-based page position over the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current: usize,
    pub size: usize,
}

impl PageState {
    pub fn new(size: usize) -> Self {
        Self {
            current: 1,
            size: size.max(1),
        }
    }

    /// Never below 1, so an empty subset still shows "1 / 1".
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.size).max(1)
    }

    pub fn clamp(&mut self, len: usize) {
        self.current = self.current.clamp(1, self.total_pages(len));
    }
}

/// One page of the filtered subset, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub number: usize,
    pub total_pages: usize,
    /// Size of the filtered subset
    pub total_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Submitting,
}

/// Everything one list page knows about its collection.
pub struct ListState<E: Entity> {
    records: Vec<E>,
    /// Indices into `records` that pass the current filter, in order
    visible: Vec<usize>,
    pub filter: FilterState,
    pub page: PageState,
    pub pending_deletion: Option<i64>,
    pub mutation: MutationState,
    /// Last issued load ticket
    pub ticket: u64,
    pub loaded: bool,
    matcher: Matcher<E>,
}

impl<E: Entity> ListState<E> {
    pub fn new(page_size: usize) -> Self {
        Self::with_matcher(page_size, Rc::new(|record: &E, query: &str| record.matches_filter(query)))
    }

    pub fn with_matcher(page_size: usize, matcher: Matcher<E>) -> Self {
        Self {
            records: Vec::new(),
            visible: Vec::new(),
            filter: FilterState::default(),
            page: PageState::new(page_size),
            pending_deletion: None,
            mutation: MutationState::Idle,
            ticket: 0,
            loaded: false,
            matcher,
        }
    }

    pub fn set_matcher(&mut self, matcher: Matcher<E>) {
        self.matcher = matcher;
        self.refilter();
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn filtered(&self) -> Vec<E> {
        self.visible.iter().map(|&i| self.records[i].clone()).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.visible.len())
    }

    pub fn matches(&self, record: &E) -> bool {
        if !(self.matcher)(record, &self.filter.query) {
            return false;
        }
        match &self.filter.category {
            Some(category) => record.category() == Some(category.as_str()),
            None => true,
        }
    }

    /// Swap in a freshly fetched collection. The filter is kept and the
    /// current page is clamped, not reset.
    pub fn replace(&mut self, records: Vec<E>) {
        self.records = records;
        self.loaded = true;
        self.refilter();
    }

    /// New filter; always goes back to page 1.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.refilter();
        self.page.current = 1;
    }

    /// Recompute the visible subset without touching the filter.
    pub fn refilter(&mut self) {
        let visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(i, _)| i)
            .collect();
        self.visible = visible;
        self.page.clamp(self.visible.len());
    }

    /// Rows `[(n-1)*size, n*size)` of the filtered subset. Pages past the end
    /// are empty; `n == 0` reads as page 1.
    pub fn slice(&self, n: usize) -> Page<E> {
        let number = n.max(1);
        let start = (number - 1).saturating_mul(self.page.size);
        let items = self
            .visible
            .iter()
            .skip(start)
            .take(self.page.size)
            .map(|&i| self.records[i].clone())
            .collect();
        Page {
            items,
            number,
            total_pages: self.total_pages(),
            total_count: self.visible.len(),
        }
    }

    /// Move to page `n`, clamped into `[1, total_pages]`.
    pub fn go_to(&mut self, n: usize) -> Page<E> {
        self.page.current = n;
        self.page.clamp(self.visible.len());
        self.slice(self.page.current)
    }

    pub fn current(&self) -> Page<E> {
        self.slice(self.page.current)
    }

    pub fn find(&self, id: i64) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Distinct category values present in the collection, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.category())
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn issue_ticket(&mut self) -> u64 {
        self.ticket += 1;
        self.ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.ticket == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_customer::aggregate::Customer;

    fn customer(id: i64, first: &str, kind: &str) -> Customer {
        Customer {
            customer_id: id,
            first_name: Some(first.to_string()),
            last_name: None,
            contact: None,
            email: None,
            customer_type: Some(kind.to_string()),
        }
    }

    fn sample(n: i64) -> Vec<Customer> {
        (1..=n)
            .map(|i| {
                let kind = if i % 3 == 0 { "Constructor" } else { "Retailler" };
                customer(i, &format!("Name{:02}", i), kind)
            })
            .collect()
    }

    fn state_with(records: Vec<Customer>, page_size: usize) -> ListState<Customer> {
        let mut state = ListState::new(page_size);
        state.replace(records);
        state
    }

    #[test]
    fn test_ann_and_bo() {
        let mut state = state_with(
            vec![customer(1, "Ann", "Retailler"), customer(2, "Bo", "Retailler")],
            10,
        );
        state.set_filter(FilterState::new("an", None));

        let first = state.slice(1);
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].customer_id, 1);
        assert_eq!(first.total_pages, 1);
        assert!(state.slice(2).items.is_empty());
    }

    #[test]
    fn test_filter_returns_exactly_the_matching_subset() {
        let records = sample(30);
        let queries = ["", "name1", "NAME0", "2", "zzz"];
        let categories = [None, Some("Constructor"), Some("Wholesaller")];
        for query in queries {
            for category in categories {
                let mut state = state_with(records.clone(), 10);
                state.set_filter(FilterState::new(query, category.map(str::to_string)));
                let filtered = state.filtered();

                let expected: Vec<_> = records
                    .iter()
                    .filter(|r| {
                        r.matches_filter(query)
                            && category.map_or(true, |c| r.category() == Some(c))
                    })
                    .cloned()
                    .collect();
                assert_eq!(filtered, expected, "query={query:?} category={category:?}");
            }
        }
    }

    #[test]
    fn test_pages_rebuild_filtered_subset() {
        for size in [1, 3, 7, 10, 40] {
            let mut state = state_with(sample(23), size);
            state.set_filter(FilterState::new("", Some("Retailler".into())));

            let mut rebuilt = Vec::new();
            for n in 1..=state.total_pages() {
                let page = state.slice(n);
                assert!(page.items.len() <= size);
                if n < page.total_pages {
                    assert_eq!(page.items.len(), size);
                }
                rebuilt.extend(page.items);
            }
            assert_eq!(rebuilt, state.filtered());
        }
    }

    #[test]
    fn test_empty_subset_has_one_empty_page() {
        let mut state = state_with(sample(5), 10);
        state.set_filter(FilterState::new("nobody", None));
        let page = state.current();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number, 1);

        let empty: ListState<Customer> = ListState::new(10);
        assert_eq!(empty.current().total_pages, 1);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = state_with(sample(25), 10);
        assert_eq!(state.go_to(7).number, 3);
        assert_eq!(state.page.current, 3);
        assert_eq!(state.go_to(0).number, 1);
        assert_eq!(state.go_to(2).items.len(), 10);
    }

    #[test]
    fn test_filter_resets_page_but_reload_keeps_it() {
        let mut state = state_with(sample(25), 10);
        state.go_to(3);

        state.replace(sample(25));
        assert_eq!(state.page.current, 3);

        state.replace(sample(12));
        assert_eq!(state.page.current, 2);

        state.set_filter(FilterState::new("name", None));
        assert_eq!(state.page.current, 1);
    }

    #[test]
    fn test_reload_keeps_filter() {
        let mut state = state_with(sample(9), 10);
        state.set_filter(FilterState::new("", Some("Constructor".into())));
        assert_eq!(state.filtered_len(), 3);

        state.replace(sample(12));
        assert_eq!(state.filtered_len(), 4);
        assert_eq!(state.filter.category.as_deref(), Some("Constructor"));
    }

    #[test]
    fn test_blank_category_means_all() {
        let filter = FilterState::new("", Some("  ".into()));
        assert_eq!(filter.category, None);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_custom_matcher() {
        let mut state = state_with(sample(5), 10);
        state.set_matcher(Rc::new(|c: &Customer, q: &str| c.customer_id.to_string() == q.trim()));
        state.set_filter(FilterState::new("4", None));
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.filtered()[0].customer_id, 4);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let state = state_with(sample(6), 10);
        assert_eq!(state.categories(), vec!["Constructor", "Retailler"]);
    }

    #[test]
    fn test_status_filter_includes_sales_shown_with_default_status() {
        use contracts::domain::a005_sale::aggregate::{Sale, DEFAULT_SALE_STATUS};

        let sales: Vec<Sale> = serde_json::from_str(
            r#"[{"sale_id":1,"status":"Pending"},{"sale_id":2},{"sale_id":3,"status":"Completed"}]"#,
        )
        .unwrap();
        let mut state = ListState::new(10);
        state.replace(sales);
        state.set_filter(FilterState::new("", Some(DEFAULT_SALE_STATUS.to_string())));

        let ids: Vec<i64> = state.filtered().iter().map(|s| s.sale_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(state.categories(), vec!["Completed", "Pending"]);
    }

    #[test]
    fn test_tickets_increase() {
        let mut state: ListState<Customer> = ListState::new(10);
        let a = state.issue_ticket();
        let b = state.issue_ticket();
        assert!(b > a);
        assert!(!state.is_latest(a));
        assert!(state.is_latest(b));
    }
}
