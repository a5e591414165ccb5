use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_moon() -> Html {
    icon_base("M21 12.79A9 9 0 1111.21 3a7 7 0 109.79 9.79z")
}
pub fn icon_sun() -> Html {
    icon_base("M12 17a5 5 0 100-10 5 5 0 000 10zM12 1v2M12 21v2M4.2 4.2l1.4 1.4M18.4 18.4l1.4 1.4M1 12h2M21 12h2M4.2 19.8l1.4-1.4M18.4 5.6l1.4-1.4")
}
pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_table() -> Html {
    icon_base("M3 3h18v18H3zM3 9h18M3 15h18M9 3v18")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_menu() -> Html {
    icon_base("M3 6h18M3 12h18M3 18h18")
}
pub fn icon_search() -> Html {
    icon_base("M11 19a8 8 0 100-16 8 8 0 000 16zM21 21l-4.35-4.35")
}
pub fn icon_pencil() -> Html {
    icon_base("M17 3l4 4L7 21H3v-4z")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}
pub fn icon_close() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
