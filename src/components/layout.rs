use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use super::banner::BannerView;
use super::icons::{
    icon_credit_card, icon_layout_grid, icon_log_out, icon_menu, icon_moon, icon_sun, icon_table,
    icon_trending_up,
};
use crate::app::AppContext;
use crate::routes::Route;
use crate::state::{session, AuthStatus, Banner, Theme};

fn nav_icon(route: &Route) -> Html {
    match route {
        Route::DataManagement => icon_table(),
        Route::RegisterIncome => icon_trending_up(),
        Route::RegisterExpenses => icon_credit_card(),
        _ => icon_layout_grid(),
    }
}

/// Page title row and body spacing shared by every page.
pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex flex-wrap gap-3 items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub app: AppContext,
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let menu_open = use_state(|| false);
    let banner = use_state(|| None::<Banner>);
    let active = use_route::<Route>();
    let navigator = use_navigator();

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    let toggle_theme = {
        let theme = props.app.theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            next.save();
            next.apply();
            log::debug!("theme switched to {}", next.as_str());
            theme.set(next);
        })
    };

    let on_logout = {
        let api = props.app.api.clone();
        let auth = props.app.auth.clone();
        let banner = banner.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let auth = auth.clone();
            let banner = banner.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match session::logout(&*api).await {
                    Ok(()) => {
                        auth.set(AuthStatus::Unauthenticated);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(message) => banner.set(Some(Banner::error(message))),
                }
            });
        })
    };

    let on_dismiss = {
        let banner = banner.clone();
        Callback::from(move |_| banner.set(None))
    };

    let sidebar_class = if *menu_open {
        "flex fixed inset-y-0 left-0 z-30 md:static"
    } else {
        "hidden md:flex"
    };

    html! {
        <div class="flex h-screen bg-background">
            <div class={sidebar_class}>
                <div class="w-[220px] h-screen bg-[#D8E1E8] dark:bg-slate-900 p-4 flex flex-col">
                    <div class="flex items-center gap-3 px-2 mb-8">
                        <span class="text-[#173E63] dark:text-sky-200 text-xl font-black tracking-tight">{"Finance Tracker"}</span>
                    </div>

                    <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                        <nav class="flex-1 space-y-2">
                            { for Route::NAV.iter().map(|(route, label)| {
                                let class_name = if active.as_ref() == Some(route) {
                                    "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                                } else {
                                    "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                                };
                                let close_menu = {
                                    let menu_open = menu_open.clone();
                                    Callback::from(move |_: MouseEvent| menu_open.set(false))
                                };
                                html! {
                                    <div onclick={close_menu}>
                                        <Link<Route> to={route.clone()} classes={classes!(class_name)}>
                                            <span class="shrink-0">{ nav_icon(route) }</span>
                                            <span class="truncate whitespace-nowrap text-left">{ *label }</span>
                                        </Link<Route>>
                                    </div>
                                }
                            }) }
                        </nav>

                        <div class="mt-auto pt-4">
                            <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                                { icon_log_out() }
                                <span>{"Log Out"}</span>
                            </button>
                        </div>
                    </div>
                </div>
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <header class="bg-[#D8E1E8] dark:bg-slate-900 border-b border-border h-16 flex items-center justify-between px-6">
                    <button class="md:hidden p-2 rounded-full hover:bg-secondary" aria-label="Menu" onclick={toggle_menu}>
                        { icon_menu() }
                    </button>
                    <div class="flex-1"></div>
                    <div class="flex items-center gap-4">
                        if let Some(label) = props.app.auth.label() {
                            <span class="text-sm text-muted-foreground">{ label }</span>
                        }
                        <button class="p-2 hover:bg-secondary rounded-full transition-colors" aria-label="Toggle theme" onclick={toggle_theme}>
                            { if *props.app.theme == Theme::Dark { icon_sun() } else { icon_moon() } }
                        </button>
                    </div>
                </header>
                <main class="flex-1 overflow-y-auto">
                    <div class="px-6 pt-4">
                        <BannerView banner={(*banner).clone()} {on_dismiss} />
                    </div>
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}
