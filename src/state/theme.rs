//! Light/dark theme: persistence, the `dark` class on `<html>`, chart colours
//! and the observer that tells the dashboard the class changed.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MutationObserver, MutationObserverInit, MutationRecord};

use crate::config::{read_storage, write_storage};

const THEME_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference, else the system colour scheme.
    pub fn load() -> Self {
        read_storage(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_else(system_preference)
    }

    pub fn save(self) {
        write_storage(THEME_KEY, self.as_str());
    }

    /// Adds or removes the `dark` class on the document root.
    pub fn apply(self) {
        let Some(root) = document_root() else {
            return;
        };
        let classes = root.class_list();
        let result = match self {
            Theme::Dark => classes.add_1(DARK_CLASS),
            Theme::Light => classes.remove_1(DARK_CLASS),
        };
        if result.is_err() {
            log::warn!("could not switch the document to the {} theme", self.as_str());
        }
    }

    /// The theme the document currently shows.
    pub fn current() -> Self {
        match document_root() {
            Some(root) if root.class_list().contains(DARK_CLASS) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> ChartPalette {
        match self {
            Theme::Light => ChartPalette {
                text: "#4b5563",
                axis_line: "rgba(229, 231, 235, 0.5)",
                grid: "rgba(229, 231, 235, 0.5)",
                tooltip_bg: "#ffffff",
                tooltip_border: "#e5e7eb",
                tooltip_text: "#4b5563",
            },
            Theme::Dark => ChartPalette {
                text: "#e2e8f0",
                axis_line: "#4a5568",
                grid: "rgba(74, 85, 104, 0.5)",
                tooltip_bg: "#2d3748",
                tooltip_border: "#4a5568",
                tooltip_text: "#e2e8f0",
            },
        }
    }
}

/// Colours for chart text, grid lines and tooltips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartPalette {
    pub text: &'static str,
    pub axis_line: &'static str,
    pub grid: &'static str,
    pub tooltip_bg: &'static str,
    pub tooltip_border: &'static str,
    pub tooltip_text: &'static str,
}

fn document_root() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.document_element()
}

fn system_preference() -> Theme {
    let dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false);
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Watches the `class` attribute of `<html>`. Disconnects when dropped.
pub struct ThemeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ThemeObserver {
    pub fn watch(on_change: impl Fn(Theme) + 'static) -> Option<Self> {
        let root = document_root()?;
        let callback = Closure::wrap(Box::new(move |records: js_sys::Array, _: MutationObserver| {
            let class_changed = records.iter().any(|r| {
                r.dyn_into::<MutationRecord>()
                    .map(|m| m.type_() == "attributes" && m.attribute_name().as_deref() == Some("class"))
                    .unwrap_or(false)
            });
            if class_changed {
                let theme = Theme::current();
                log::debug!("document class changed, theme is now {}", theme.as_str());
                on_change(theme);
            }
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        if observer.observe_with_options(&root, &init).is_err() {
            log::warn!("theme observer could not attach to the document");
            return None;
        }
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ThemeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
