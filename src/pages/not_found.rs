use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::page_shell;
use crate::routes::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    page_shell(
        "Page not found",
        html! {},
        html! {
            <p class="text-muted-foreground">
                {"Nothing lives at this address. "}
                <Link<Route> to={Route::Dashboard} classes={classes!("text-primary", "font-semibold")}>{"Back to the dashboard"}</Link<Route>>
            </p>
        },
    )
}
