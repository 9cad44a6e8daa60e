use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use thaw::*;

use super::confirm_dialog::ConfirmDialog;
use super::entity_form::EntityFormModal;
use super::filter_panel::{merge_options, FilterPanel};
use super::pagination_controls::PaginationControls;
use crate::shared::error::ApiError;
use crate::shared::form::FormValues;
use crate::shared::icons::icon;
use crate::shared::list_view::{ListViewController, Outcome};
use crate::shared::notify;
use crate::shared::table::{Cell, TableProjection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit(i64),
}

fn render_cell(cell: Cell) -> AnyView {
    match cell {
        Cell::Text(text) => view! { <TableCellLayout truncate=true>{text}</TableCellLayout> }.into_any(),
        Cell::Strong(text) => view! {
            <TableCellLayout truncate=true>
                <span style="font-weight: 500;">{text}</span>
            </TableCellLayout>
        }
        .into_any(),
        Cell::Badge { text, class } => view! {
            <TableCellLayout>
                <span class=format!("badge {}", class)>{text}</span>
            </TableCellLayout>
        }
        .into_any(),
    }
}

/// Complete list page for one entity: header, filters, table, pagination,
/// add/edit modal and delete confirmation, all driven by `controller`.
#[component]
pub fn EntityListPage<E>(
    controller: ListViewController<E>,
    title: &'static str,
    /// Label of the category/status selector; `None` hides it
    #[prop(optional)]
    category_label: Option<&'static str>,
    /// Fixed category values, listed before the ones found in the data
    #[prop(optional)]
    category_options: Vec<String>,
    #[prop(optional, into)]
    search_placeholder: String,
    /// Shows the "Add" button; defaults to true
    #[prop(optional, into)]
    can_create: Option<Signal<bool>>,
) -> impl IntoView
where
    E: TableProjection,
{
    let can_create = can_create.unwrap_or_else(|| Signal::from(true));

    let version = RwSignal::new(0u64);
    controller.set_on_change(move || version.update(|v| *v += 1));

    // Lookup data shared between the matcher, the table and the form
    let context: Rc<RefCell<E::Context>> = Rc::new(RefCell::new(E::Context::default()));
    {
        let context = context.clone();
        controller.set_matcher(Rc::new(move |record: &E, query: &str| {
            record.matches_in(query, &context.borrow())
        }));
    }
    let context = StoredValue::new_local(context);
    let controller = StoredValue::new_local(controller);
    let ctl = move || controller.get_value();
    let ctx = move || context.with_value(|c| c.borrow().clone());

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let form_mode = RwSignal::new(None::<FormMode>);
    let form_values = RwSignal::new(FormValues::new());
    let deleting_name = RwSignal::new(String::new());

    let fail = move |context: String, err: ApiError| {
        let message = notify::report(&context, &err);
        set_error.set(Some(message));
    };

    let load_data = move || {
        let controller = ctl();
        let context = context.get_value();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match E::load_context(controller.api()).await {
                Ok(loaded) => {
                    *context.borrow_mut() = loaded;
                    controller.refilter();
                }
                Err(e) => fail(format!("Error loading data for {}", E::PLURAL), e),
            }
            if let Err(e) = controller.load().await {
                fail(format!("Error loading {}", E::PLURAL), e);
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !controller.with_value(|c| c.is_loaded()) {
            load_data();
        }
    });

    let busy = Signal::derive(move || {
        version.track();
        controller.with_value(|c| c.is_submitting())
    });
    let page_info = Memo::new(move |_| {
        version.track();
        let page = controller.with_value(|c| c.current_page());
        (page.number, page.total_pages, page.total_count)
    });
    let page_size = controller.with_value(|c| c.page_size());
    let record_count = Signal::derive(move || {
        version.track();
        controller.with_value(|c| c.records().len())
    });
    let query = Signal::derive(move || {
        version.track();
        controller.with_value(|c| c.filter().query)
    });
    let category = Signal::derive(move || {
        version.track();
        controller.with_value(|c| c.filter().category)
    });
    let category_choices = Signal::derive(move || {
        version.track();
        merge_options(&category_options, &controller.with_value(|c| c.categories()))
    });

    let on_query = Callback::new(move |q: String| {
        let c = ctl();
        let category = c.filter().category;
        c.apply_filter(&q, category);
    });
    let on_category = Callback::new(move |category: Option<String>| {
        let c = ctl();
        let q = c.filter().query;
        c.apply_filter(&q, category);
    });
    let on_page_change = Callback::new(move |n: usize| {
        ctl().go_to_page(n);
    });

    let open_create = move || {
        form_values.set(E::blank_form(&ctx()));
        form_mode.set(Some(FormMode::Create));
    };
    let close_form = Callback::new(move |_: ()| form_mode.set(None));
    let on_field_change = Callback::new(move |key: &'static str| {
        let ctx = ctx();
        form_values.update(|values| E::form_changed(values, key, &ctx));
    });

    let on_submit = Callback::new(move |_: ()| {
        let Some(mode) = form_mode.get_untracked() else {
            return;
        };
        let draft = match E::draft_from_form(&form_values.get_untracked(), &ctx()) {
            Ok(draft) => draft,
            Err(e) => {
                notify::report("Error", &ApiError::Validation(e));
                return;
            }
        };
        let controller = ctl();
        spawn_local(async move {
            let (result, done) = match mode {
                FormMode::Create => (controller.create(draft).await, "added"),
                FormMode::Edit(id) => (controller.update(id, draft).await, "updated"),
            };
            match result {
                Ok(outcome @ (Outcome::Done | Outcome::ReloadFailed(_))) => {
                    form_mode.set(None);
                    set_error.set(None);
                    notify::alert(&format!("{} {} successfully!", E::LABEL, done));
                    if let Outcome::ReloadFailed(e) = outcome {
                        fail(format!("Error loading {}", E::PLURAL), e);
                    }
                }
                Ok(Outcome::Skipped) => {}
                Err(e) => fail("Error".to_string(), e),
            }
        });
    });

    let on_confirm_delete = Callback::new(move |_: ()| {
        let controller = ctl();
        spawn_local(async move {
            match controller.confirm_deletion().await {
                Ok(outcome @ (Outcome::Done | Outcome::ReloadFailed(_))) => {
                    set_error.set(None);
                    notify::alert(&format!("{} deleted successfully!", E::LABEL));
                    if let Outcome::ReloadFailed(e) = outcome {
                        fail(format!("Error loading {}", E::PLURAL), e);
                    }
                }
                Ok(Outcome::Skipped) => {}
                Err(e) => fail("Error".to_string(), e),
            }
        });
    });
    let on_cancel_delete = Callback::new(move |_: ()| ctl().cancel_deletion());
    let pending_deletion = Memo::new(move |_| {
        version.track();
        controller.with_value(|c| c.pending_deletion())
    });

    let toggle_active = move |id: i64, active: bool| {
        let controller = ctl();
        spawn_local(async move {
            match controller.set_active(id, active).await {
                Ok(outcome @ (Outcome::Done | Outcome::ReloadFailed(_))) => {
                    let action = if active { "activated" } else { "deactivated" };
                    notify::alert(&format!("{} {} successfully!", E::LABEL, action));
                    if let Outcome::ReloadFailed(e) = outcome {
                        fail(format!("Error loading {}", E::PLURAL), e);
                    }
                }
                Ok(Outcome::Skipped) => {}
                Err(e) => fail("Error".to_string(), e),
            }
        });
    };

    let rows = move || {
        version.track();
        let page = controller.with_value(|c| c.current_page());
        let ctx = ctx();
        page.items
            .into_iter()
            .map(|record| {
                let id = record.id();
                let name = record.display_name();
                let edit_values = record.form_values();
                let active = record.active_flag();
                let cells = record
                    .cells(&ctx)
                    .into_iter()
                    .map(|cell| view! { <TableCell>{render_cell(cell)}</TableCell> })
                    .collect_view();
                view! {
                    <TableRow>
                        {cells}
                        <TableCell>
                            <div class="table__actions">
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| {
                                        form_values.set(edit_values.clone());
                                        form_mode.set(Some(FormMode::Edit(id)));
                                    }
                                    attr:title="Edit"
                                >
                                    {icon("edit")}
                                </Button>
                                {active.map(|is_active| view! {
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| toggle_active(id, !is_active)
                                        disabled=busy
                                        attr:title=if is_active { "Deactivate" } else { "Activate" }
                                    >
                                        {icon(if is_active { "user-x" } else { "user-check" })}
                                    </Button>
                                })}
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| {
                                        deleting_name.set(name.clone());
                                        ctl().stage_deletion(id);
                                    }
                                    attr:title="Delete"
                                >
                                    {icon("trash")}
                                </Button>
                            </div>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
    };

    let pagination = move || view! {
        <PaginationControls
            current_page=Signal::derive(move || page_info.get().0)
            total_pages=Signal::derive(move || page_info.get().1)
            total_count=Signal::derive(move || page_info.get().2)
            page_size=Signal::from(page_size)
            on_page_change=on_page_change
        />
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                    <Badge>{move || record_count.get().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Show when=move || can_create.get()>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_create()
                        >
                            {icon("plus")}
                            {format!(" Add {}", E::LABEL)}
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <FilterPanel
                    query=query
                    on_query=on_query
                    category_label=category_label
                    category_options=category_choices
                    category=category
                    on_category=on_category
                    placeholder=search_placeholder
                    pagination_controls=Arc::new(move || pagination().into_any())
                />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {E::headers()
                                    .into_iter()
                                    .map(|header| view! { <TableHeaderCell>{header}</TableHeaderCell> })
                                    .collect_view()}
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {rows}
                        </TableBody>
                    </Table>
                    {move || (page_info.get().2 == 0).then(|| view! {
                        <div class="table__empty">
                            {move || if loading.get() { "Loading..." } else { "No records found" }}
                        </div>
                    })}
                </div>
            </div>

            {move || form_mode.get().map(|mode| {
                let editing = matches!(mode, FormMode::Edit(_));
                let title = format!("{} {}", if editing { "Edit" } else { "Add" }, E::LABEL);
                view! {
                    <EntityFormModal
                        title=title
                        fields=E::form_fields(&ctx(), editing)
                        values=form_values
                        busy=busy
                        on_field_change=on_field_change
                        on_submit=on_submit
                        on_close=close_form
                    />
                }
            })}

            {move || {
                pending_deletion.get().map(|_| view! {
                    <ConfirmDialog
                        title=format!("Delete {}", E::LABEL)
                        message=format!(
                            "Are you sure you want to delete {}?",
                            deleting_name.get_untracked()
                        )
                        busy=busy
                        on_confirm=on_confirm_delete
                        on_cancel=on_cancel_delete
                    />
                })
            }}
        </div>
    }
}
