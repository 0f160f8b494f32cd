//! Main application component.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{EditorPage, HomePage, NotFoundPage};
use crate::routes::Route;

/// Route switch function.
fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Editor { template_id } => html! { <EditorPage template_id={template_id} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

/// Root application component.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
