use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use leptos::prelude::*;

/// Value of the "all categories" option
const ALL: &str = "";

/// Options of the category selector: the fixed values first, then anything
/// else present in the collection.
pub fn merge_options(fixed: &[String], present: &[String]) -> Vec<String> {
    let mut options = fixed.to_vec();
    for value in present {
        if !options.iter().any(|o| o == value) {
            options.push(value.clone());
        }
    }
    options
}

/// Search box, optional category selector, reset button and a slot for the
/// pagination controls.
#[component]
pub fn FilterPanel(
    #[prop(into)]
    query: Signal<String>,
    #[prop(into)]
    on_query: Callback<String>,

    /// Label of the category selector; `None` hides it
    #[prop(optional_no_strip)]
    category_label: Option<&'static str>,
    #[prop(into)]
    category_options: Signal<Vec<String>>,
    #[prop(into)]
    category: Signal<Option<String>>,
    #[prop(into)]
    on_category: Callback<Option<String>>,

    #[prop(optional, into)]
    placeholder: String,

    pagination_controls: ChildrenFn,
) -> impl IntoView {
    let active_filters_count = move || {
        usize::from(!query.get().trim().is_empty()) + usize::from(category.get().is_some())
    };

    let reset = move |_| {
        on_query.run(String::new());
        on_category.run(None);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left">
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls()}
                </div>
            </div>

            <div class="filter-panel-content">
                <SearchInput value=query on_change=on_query placeholder=placeholder />
                {category_label.map(|label| view! {
                    <label class="filter-panel__select">
                        <span>{label}</span>
                        <select
                            prop:value=move || category.get().unwrap_or_default()
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                on_category.run(Some(value).filter(|v| v != ALL));
                            }
                        >
                            <option value=ALL>"All"</option>
                            {move || category_options.get().into_iter().map(|option| {
                                let selected = category.get().as_deref() == Some(option.as_str());
                                view! { <option value=option.clone() selected=selected>{option.clone()}</option> }
                            }).collect_view()}
                        </select>
                    </label>
                })}
                <button class="button button--secondary" on:click=reset>
                    "Reset"
                </button>
            </div>
        </div>
    }
}
