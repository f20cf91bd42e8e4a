use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
pub const PAGE_CAT_LIST: &str = "list";

/// Root wrapper of every page: sets `id` ("{entity}--{category}") and
/// `data-page-category` on the root element.
#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
