use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::AppContext;
use crate::components::layout::Layout;
use crate::pages::{
    DashboardPage, DataManagementPage, LoginPage, NotFoundPage, RegisterExpensesPage,
    RegisterIncomePage,
};
use crate::state::AuthStatus;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/data-management")]
    DataManagement,
    #[at("/register-income")]
    RegisterIncome,
    #[at("/register-expenses")]
    RegisterExpenses,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub const NAV: [(Route, &'static str); 4] = [
        (Route::Dashboard, "Dashboard"),
        (Route::DataManagement, "Data Management"),
        (Route::RegisterIncome, "Register Income"),
        (Route::RegisterExpenses, "Register Expenses"),
    ];
}

pub fn switch(route: Route) -> Html {
    html! { <Screen {route} /> }
}

#[derive(Properties, PartialEq)]
struct ScreenProps {
    route: Route,
}

/// Picks the page for `route`, sending logged-out users to the login form
/// and logged-in users away from it.
#[function_component(Screen)]
fn screen(props: &ScreenProps) -> Html {
    let app = use_context::<AppContext>();
    let Some(app) = app else {
        return html! {};
    };

    match (&*app.auth, &props.route) {
        (AuthStatus::Checking, _) => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        },
        (AuthStatus::Unauthenticated, Route::Login) => html! { <LoginPage app={app.clone()} /> },
        (AuthStatus::Unauthenticated, _) => html! { <Redirect<Route> to={Route::Login} /> },
        (AuthStatus::Authenticated { .. }, Route::Login) => html! { <Redirect<Route> to={Route::Dashboard} /> },
        (AuthStatus::Authenticated { .. }, route) => {
            let page = match route {
                Route::Dashboard => html! { <DashboardPage app={app.clone()} /> },
                Route::DataManagement => html! { <DataManagementPage app={app.clone()} /> },
                Route::RegisterIncome => html! { <RegisterIncomePage app={app.clone()} /> },
                Route::RegisterExpenses => html! { <RegisterExpensesPage app={app.clone()} /> },
                Route::Login | Route::NotFound => html! { <NotFoundPage /> },
            };
            html! {
                <Layout app={app.clone()}>
                    { page }
                </Layout>
            }
        }
    }
}
