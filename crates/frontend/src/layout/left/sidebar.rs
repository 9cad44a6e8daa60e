//! Sidebar with one entry per page

use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div class="app-sidebar__content">
            {AppPage::ALL
                .into_iter()
                .map(|page| {
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active.get() == page
                            style:padding-left="12px"
                            on:click=move |_| ctx.open(page)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(page.icon())}
                                <span>{page.label()}</span>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
