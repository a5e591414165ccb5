//! Root component: shared context, the session check and the router.

use std::rc::Rc;

use chrono::{Local, NaiveDate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{FinanceApi, HttpClient};
use crate::routes::{switch, Route};
use crate::state::{session, AuthStatus, Theme};

/// Handed to every page. The backend sits behind [`FinanceApi`] so pages
/// never name the HTTP client.
#[derive(Clone)]
pub struct AppContext {
    pub api: Rc<dyn FinanceApi>,
    pub auth: UseStateHandle<AuthStatus>,
    pub theme: UseStateHandle<Theme>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && self.auth == other.auth && self.theme == other.theme
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[function_component(App)]
pub fn app() -> Html {
    let api = use_state(|| Rc::new(HttpClient::default()) as Rc<dyn FinanceApi>);
    let api: Rc<dyn FinanceApi> = (*api).clone();
    let auth = use_state(|| AuthStatus::Checking);
    let theme = use_state(|| {
        let theme = Theme::load();
        theme.apply();
        theme
    });

    {
        let api = Rc::clone(&api);
        let auth = auth.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let path = current_path();
                    let status = session::check(&*api, &path).await;
                    log::debug!("session check on {}: {:?}", path, status);
                    auth.set(status);
                });
                || ()
            },
            (),
        );
    }

    let context = AppContext {
        api,
        auth,
        theme,
    };

    html! {
        <ContextProvider<AppContext> {context}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}
