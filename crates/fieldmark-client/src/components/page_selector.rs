//! Page switcher. Pages are 1-based; the range covers every page that has
//! a field plus the page currently shown, so moving a field to a later
//! page immediately grows the strip.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageSelectorProps {
    pub active_page: u32,
    /// Highest page any field occupies (at least 1).
    pub max_page: u32,
    pub on_select: Callback<u32>,
}

#[function_component(PageSelector)]
pub fn page_selector(props: &PageSelectorProps) -> Html {
    let last = props.max_page.max(props.active_page);

    html! {
        <nav class="page-selector">
            { for (1..=last).map(|page| {
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(page))
                };
                let class = classes!(
                    "page-selector-button",
                    (page == props.active_page).then_some("page-selector-active"),
                );
                html! {
                    <button key={page} {class} {onclick}>
                        { format!("Page {page}") }
                    </button>
                }
            }) }
        </nav>
    }
}
