//! Application routes.

use yew_router::prelude::*;

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    /// Home page: pick a template to edit.
    #[at("/")]
    Home,
    /// Field placement editor for one template.
    #[at("/editor/:template_id")]
    Editor { template_id: String },
    /// 404 Not Found.
    #[not_found]
    #[at("/404")]
    NotFound,
}
