//! Transient error toast. Auto-dismisses after a few seconds; a new
//! message restarts the timer.

use yew::prelude::*;
use yew_icons::{Icon, IconData};

const DISMISS_AFTER_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let timer = use_mut_ref(|| None::<gloo::timers::callback::Timeout>);

    {
        let timer = timer.clone();
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.message.clone(), move |message| {
            *timer.borrow_mut() = message.as_ref().map(|_| {
                gloo::timers::callback::Timeout::new(DISMISS_AFTER_MS, move || {
                    on_dismiss.emit(());
                })
            });
        });
    }

    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class="toast toast-error" {onclick}>
            <span>{ message }</span>
            <Icon data={IconData::LUCIDE_X} width="14px" height="14px" />
        </div>
    }
}
