//! Home page: jump into a template's field editor.

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let navigator = use_navigator().expect("navigator available under BrowserRouter");
    let template_ref = use_node_ref();

    let on_open = {
        let navigator = navigator.clone();
        let template_ref = template_ref.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(input) = template_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let template_id = input.value().trim().to_string();
            if template_id.is_empty() {
                return;
            }
            navigator.push(&Route::Editor { template_id });
        })
    };

    html! {
        <main class="page home-page">
            <h1>{ "Fieldmark" }</h1>
            <p>{ "Place signature fields on a document template." }</p>
            <form class="home-open-form" onsubmit={on_open}>
                <input
                    ref={template_ref}
                    type="text"
                    placeholder="Template id"
                />
                <button type="submit">{ "Open editor" }</button>
            </form>
        </main>
    }
}
