use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::AppContext;
use crate::routes::Route;
use crate::state::{session, AuthStatus};

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub app: AppContext,
}

fn bind(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let api = props.app.api.clone();
        let auth = props.app.auth.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let user = (*username).clone();
            let pass = (*password).clone();
            let error = error.clone();
            let loading = loading.clone();
            let api = api.clone();
            let auth = auth.clone();
            let navigator = navigator.clone();

            loading.set(true);
            error.set(None);
            spawn_local(async move {
                match session::login(&*api, &user, &pass).await {
                    Ok(()) => {
                        auth.set(AuthStatus::Authenticated {
                            username: Some(user),
                            inferred: false,
                        });
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Welcome back"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Sign in to continue."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label for="username" class="text-sm font-medium text-foreground">{"Username"}</label>
                        <input
                            id="username"
                            type="text"
                            autocomplete="username"
                            required={true}
                            class={INPUT_CLASS}
                            value={(*username).clone()}
                            oninput={bind(&username)}
                        />
                    </div>
                    <div class="space-y-1">
                        <label for="password" class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            autocomplete="current-password"
                            required={true}
                            class={INPUT_CLASS}
                            value={(*password).clone()}
                            oninput={bind(&password)}
                        />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
