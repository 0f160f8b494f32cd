//! Editor toolbar: add-field buttons and zoom controls.

use fieldmark_core::{snap_zoom, FieldKind, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub zoom: f64,
    pub on_add: Callback<FieldKind>,
    pub on_zoom: Callback<f64>,
}

fn kind_icon(kind: FieldKind) -> IconData {
    match kind {
        FieldKind::Signature => IconData::LUCIDE_PEN_TOOL,
        FieldKind::Initials => IconData::LUCIDE_CASE_UPPER,
        FieldKind::Date => IconData::LUCIDE_CALENDAR,
        FieldKind::Text => IconData::LUCIDE_TYPE,
    }
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let zoom = props.zoom;

    let on_zoom_out = {
        let on_zoom = props.on_zoom.clone();
        Callback::from(move |_: MouseEvent| {
            on_zoom.emit(snap_zoom(zoom - ZOOM_STEP));
        })
    };
    let on_zoom_in = {
        let on_zoom = props.on_zoom.clone();
        Callback::from(move |_: MouseEvent| {
            on_zoom.emit(snap_zoom(zoom + ZOOM_STEP));
        })
    };
    let on_zoom_reset = {
        let on_zoom = props.on_zoom.clone();
        Callback::from(move |_: MouseEvent| {
            on_zoom.emit(1.0);
        })
    };

    html! {
        <div class="toolbar">
            <div class="toolbar-group">
                { for FieldKind::ALL.iter().map(|kind| {
                    let onclick = {
                        let on_add = props.on_add.clone();
                        let kind = *kind;
                        Callback::from(move |_: MouseEvent| on_add.emit(kind))
                    };
                    html! {
                        <button class="toolbar-button" {onclick} title={format!("Add {} field", kind.display_name().to_lowercase())}>
                            <Icon data={kind_icon(*kind)} width="16px" height="16px" />
                            { kind.display_name() }
                        </button>
                    }
                }) }
            </div>
            <div class="toolbar-group toolbar-zoom">
                <button
                    class="toolbar-button"
                    onclick={on_zoom_out}
                    disabled={zoom <= MIN_ZOOM}
                    title="Zoom out"
                >
                    <Icon data={IconData::LUCIDE_ZOOM_OUT} width="16px" height="16px" />
                </button>
                <button class="toolbar-button toolbar-zoom-level" onclick={on_zoom_reset} title="Reset zoom">
                    { format!("{:.0}%", zoom * 100.0) }
                </button>
                <button
                    class="toolbar-button"
                    onclick={on_zoom_in}
                    disabled={zoom >= MAX_ZOOM}
                    title="Zoom in"
                >
                    <Icon data={IconData::LUCIDE_ZOOM_IN} width="16px" height="16px" />
                </button>
            </div>
        </div>
    }
}
