use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::RESIZE_DEBOUNCE_MS;
use crate::format::Viewport;
use crate::state::theme::{Theme, ThemeObserver};

/// Window width, refreshed once resizing has paused.
#[hook]
pub fn use_viewport() -> Viewport {
    let viewport = use_state(Viewport::current);

    {
        let viewport = viewport.clone();
        use_effect_with_deps(
            move |_| {
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
                let listener = Closure::wrap(Box::new(move |_: web_sys::Event| {
                    let viewport = viewport.clone();
                    // Replacing the pending timeout cancels it.
                    *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                        let next = Viewport::current();
                        debug!("viewport resized to {}px", next.width);
                        viewport.set(next);
                    }));
                }) as Box<dyn FnMut(web_sys::Event)>);

                let window = web_sys::window();
                if let Some(window) = &window {
                    let _ = window
                        .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    *viewport
}

/// Theme shown by the document, following changes to its `class` attribute.
#[hook]
pub fn use_document_theme() -> Theme {
    let theme = use_state(Theme::current);

    {
        let theme = theme.clone();
        use_effect_with_deps(
            move |_| {
                let observer = ThemeObserver::watch(move |next| theme.set(next));
                move || drop(observer)
            },
            (),
        );
    }

    *theme
}
