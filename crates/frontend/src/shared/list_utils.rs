/// Search helpers shared by the list pages
use contracts::domain::common::Entity;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Delay between the last keystroke and the filter being applied
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Types that can be matched against a free-text query
pub trait Searchable {
    /// True when the query is blank or any searchable field contains it,
    /// ignoring case.
    fn matches_filter(&self, filter: &str) -> bool;
}

impl<E: Entity> Searchable for E {
    fn matches_filter(&self, filter: &str) -> bool {
        matches_any(self.search_fields(), filter)
    }
}

/// Case-insensitive substring match over a set of field values.
pub fn matches_any<'a>(fields: impl IntoIterator<Item = &'a str>, filter: &str) -> bool {
    if filter.trim().is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    fields
        .into_iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new query once typing pauses
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Replacing the handle drops (and cancels) the previous timer
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timer));
    };

    // Cleared from outside (reset button)
    Effect::new(move |_| {
        if value.get().is_empty() {
            pending.set_value(None);
            set_input_value.set(String::new());
        }
    });

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || if is_filter_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || (!input_value.get().is_empty()).then(|| view! {
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {icon("x")}
                </button>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_matches_everything() {
        assert!(matches_any(["Ann"], ""));
        assert!(matches_any(["Ann"], "   "));
        assert!(matches_any(std::iter::empty(), ""));
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert!(matches_any(["Ann", "Lee"], "LE"));
        assert!(matches_any(["ann@example.com"], "EXAMPLE."));
        assert!(!matches_any(["Ann", "Lee"], "bo"));
        assert!(!matches_any(std::iter::empty(), "a"));
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_query() {
        assert!(!matches_any(["Ann"], "n "));
        assert!(!matches_any(["Ann Lee"], " ann"));
        assert!(matches_any(["Ann Lee"], "n l"));
    }
}
