pub mod page_selector;
pub mod placement_canvas;
pub mod property_panel;
pub mod toast;
pub mod toolbar;
