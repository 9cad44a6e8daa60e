use leptos::prelude::*;

/// Stroke paths (24x24 viewBox) of the icons used by the panel
fn paths(name: &str) -> &'static [&'static str] {
    match name {
        "dashboard" => &["M3 3h7v9H3z", "M14 3h7v5h-7z", "M14 12h7v9h-7z", "M3 16h7v5H3z"],
        "customers" => &[
            "M17 21v-2a4 4 0 0 0-4-4H7a4 4 0 0 0-4 4v2",
            "M9 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
            "M23 21v-2a4 4 0 0 0-3-3.87",
            "M16 3.13a4 4 0 0 1 0 7.75",
        ],
        "employees" => &[
            "M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2",
            "M9 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
            "M22 11h-6",
        ],
        "products" => &[
            "M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z",
            "M3.27 6.96 12 12l8.73-5.04",
            "M12 22V12",
        ],
        "suppliers" => &["M3 22h18", "M6 22V8l6-5 6 5v14", "M9 13h6v9H9z"],
        "sales" => &[
            "M1 1h4l2.68 12.39a2 2 0 0 0 2 1.61h7.72a2 2 0 0 0 2-1.61L23 6H6",
            "M9 20a1 1 0 1 0 0 2 1 1 0 0 0 0-2z",
            "M20 20a1 1 0 1 0 0 2 1 1 0 0 0 0-2z",
        ],
        "users" => &[
            "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2",
            "M12 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
        ],
        "user-check" => &[
            "M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2",
            "M9 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
            "M16 11l2 2 4-4",
        ],
        "user-x" => &[
            "M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2",
            "M9 3a4 4 0 1 0 0 8 4 4 0 0 0 0-8z",
            "M17 8l5 5",
            "M22 8l-5 5",
        ],
        "logout" => &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
        "plus" => &["M12 5v14", "M5 12h14"],
        "edit" => &["M12 20h9", "M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4z"],
        "trash" => &[
            "M3 6h18",
            "M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6",
            "M10 11v6",
            "M14 11v6",
            "M9 6V4a1 1 0 0 1 1-1h4a1 1 0 0 1 1 1v2",
        ],
        "refresh" => &["M23 4v6h-6", "M1 20v-6h6", "M3.51 9a9 9 0 0 1 14.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0 0 20.49 15"],
        "filter" => &["M22 3H2l8 9.46V19l4 2v-8.54z"],
        "x" => &["M18 6 6 18", "M6 6l12 12"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevron-right" => &["M9 18l6-6-6-6"],
        "chevrons-left" => &["M11 17l-5-5 5-5", "M18 17l-5-5 5-5"],
        "chevrons-right" => &["M13 17l5-5-5-5", "M6 17l5-5-5-5"],
        _ => &["M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z", "M12 8v4l3 3"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let size = if name.starts_with("chevron") { "16" } else { "20" };
    view! {
        <svg width=size height=size viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths(name).iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
