use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::BANNER_TIMEOUT_MS;
use crate::state::Banner;

#[derive(Properties, PartialEq)]
pub struct BannerViewProps {
    pub banner: Option<Banner>,
    pub on_dismiss: Callback<()>,
}

/// Shows the current banner and clears it after a few seconds. A new banner
/// restarts the timer.
#[function_component(BannerView)]
pub fn banner_view(props: &BannerViewProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |banner: &Option<Banner>| {
                let timeout = banner
                    .as_ref()
                    .map(|_| Timeout::new(BANNER_TIMEOUT_MS, move || on_dismiss.emit(())));
                move || drop(timeout)
            },
            props.banner.clone(),
        );
    }

    let Some(banner) = &props.banner else {
        return html! {};
    };
    let tone = if banner.is_error() {
        "bg-red-50 text-red-700 border-red-200 dark:bg-red-900/30 dark:text-red-200 dark:border-red-800"
    } else {
        "bg-green-50 text-green-700 border-green-200 dark:bg-green-900/30 dark:text-green-200 dark:border-green-800"
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class={format!("{} flex items-center justify-between gap-4 px-4 py-3 rounded-[10px] border text-sm {}", banner.kind.class(), tone)} role="alert">
            <span>{ banner.message.clone() }</span>
            <button type="button" class="opacity-70 hover:opacity-100" aria-label="Dismiss" onclick={on_close}>
                { super::icons::icon_close() }
            </button>
        </div>
    }
}
