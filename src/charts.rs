//! Chart drawing, delegated to Chart.js.
//!
//! The dashboard only builds [`ChartData`] and hands it to a
//! [`ChartRenderer`]. [`chart_config`] turns the data into the JSON config
//! Chart.js expects; [`ChartJs`] attaches the formatter callbacks and owns the
//! live chart instances.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{json, Value};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::error::{AppError, AppResult};
use crate::format;
use crate::state::theme::ChartPalette;

pub const SOFT_REDS: &[&str] = &[
    "#CD5C5C", "#E57373", "#FFB6C1", "#FFA07A", "#FA8072", "#F08080", "#E9967A", "#DB7093",
    "#FFD1DC", "#BC8F8F",
];

pub const SOFT_GREENS: &[&str] = &["#8BC34A", "#AED581", "#C5E1A5", "#DCE775", "#9CCC65", "#7CB342"];

pub const SOFT_BLUES: &[&str] = &["#64B5F6", "#90CAF9", "#BBDEFB", "#E3F2FD"];

const DATASET_LABEL: &str = "Amount (€)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    HorizontalBar,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
}

impl ChartData {
    /// Pairs each entry with a colour, cycling through `palette`.
    pub fn new(entries: Vec<(String, f64)>, palette: &[&'static str]) -> Self {
        let colors = palette.iter().copied().cycle().take(entries.len()).collect();
        let (labels, values) = entries.into_iter().unzip();
        Self {
            labels,
            values,
            colors,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Draws and clears charts on named canvases.
pub trait ChartRenderer {
    fn render_chart(
        &self,
        canvas_id: &str,
        kind: ChartKind,
        data: &ChartData,
        palette: &ChartPalette,
    ) -> AppResult<()>;

    fn destroy(&self, canvas_id: &str);
}

/// Chart.js config without callbacks.
pub fn chart_config(kind: ChartKind, data: &ChartData, palette: &ChartPalette) -> Value {
    let dataset = json!({
        "label": DATASET_LABEL,
        "data": data.values,
        "backgroundColor": data.colors,
        "borderColor": data.colors,
        "borderWidth": 1,
    });
    let tooltip = json!({
        "backgroundColor": palette.tooltip_bg,
        "borderColor": palette.tooltip_border,
        "titleColor": palette.tooltip_text,
        "bodyColor": palette.tooltip_text,
    });
    let datalabels_font = json!({ "weight": "bold", "size": 12 });

    let options = match kind {
        ChartKind::Pie => json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": { "position": "bottom", "labels": { "color": palette.text } },
                "tooltip": tooltip,
                "datalabels": { "color": palette.text, "font": datalabels_font },
            },
            "scales": {
                "x": { "display": false, "grid": { "display": false }, "ticks": { "display": false } },
                "y": { "display": false, "grid": { "display": false }, "ticks": { "display": false } },
            },
        }),
        ChartKind::HorizontalBar => json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "indexAxis": "y",
            "plugins": {
                "legend": { "display": false },
                "tooltip": tooltip,
                "datalabels": {
                    "color": palette.text,
                    "anchor": "end",
                    "align": "start",
                    "font": datalabels_font,
                },
            },
            "scales": {
                "x": {
                    "beginAtZero": true,
                    "title": { "display": true, "text": DATASET_LABEL, "color": palette.text },
                    "ticks": { "color": palette.text },
                    "grid": { "color": palette.grid },
                    "border": { "color": palette.axis_line },
                },
                "y": {
                    "title": { "display": false },
                    "ticks": { "color": palette.text },
                    "grid": { "color": palette.grid },
                    "border": { "color": palette.axis_line },
                },
            },
        }),
    };

    json!({
        "type": match kind {
            ChartKind::Pie => "pie",
            ChartKind::HorizontalBar => "bar",
        },
        "data": { "labels": data.labels, "datasets": [dataset] },
        "options": options,
    })
}

#[wasm_bindgen]
extern "C" {
    /// The global `Chart` constructor loaded by `index.html`.
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

type Callback2 = Closure<dyn FnMut(JsValue, JsValue) -> JsValue>;

struct Instance {
    chart: Chart,
    _callbacks: Vec<Callback2>,
}

/// Chart.js backed renderer. One live chart per canvas id.
#[derive(Default)]
pub struct ChartJs {
    instances: RefCell<HashMap<String, Instance>>,
}

fn js_error(context: &str, err: JsValue) -> AppError {
    AppError::Render(format!(
        "{}: {}",
        context,
        err.as_string().unwrap_or_else(|| format!("{:?}", err))
    ))
}

fn get(target: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn get_path(target: &JsValue, path: &[&str]) -> JsValue {
    path.iter().fold(target.clone(), |obj, key| get(&obj, key))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> AppResult<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| js_error(key, e))
}

fn callback(f: impl FnMut(JsValue, JsValue) -> JsValue + 'static) -> Callback2 {
    Closure::wrap(Box::new(f) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>)
}

fn currency_text(value: &JsValue) -> JsValue {
    JsValue::from_str(&value.as_f64().map(format::currency).unwrap_or_else(|| format::currency(f64::NAN)))
}

/// `"<label>: <currency>"` as a tooltip line.
fn tooltip_line(label: JsValue, amount: JsValue) -> JsValue {
    let label = label.as_string().unwrap_or_default();
    let amount = currency_text(&amount).as_string().unwrap_or_default();
    if label.is_empty() {
        JsValue::from_str(&amount)
    } else {
        JsValue::from_str(&format!("{}: {}", label, amount))
    }
}

impl ChartJs {
    fn attach_callbacks(&self, config: &JsValue, kind: ChartKind, total: f64) -> AppResult<Vec<Callback2>> {
        let plugins = get_path(config, &["options", "plugins"]);
        let datalabels = get(&plugins, "datalabels");
        let tooltip = get(&plugins, "tooltip");
        let tooltip_callbacks = js_sys::Object::new();
        set(&tooltip, "callbacks", &tooltip_callbacks)?;

        let mut callbacks = Vec::new();
        match kind {
            ChartKind::Pie => {
                let labels = callback(move |value, _| {
                    JsValue::from_str(&format::percentage(value.as_f64().unwrap_or(0.0), total))
                });
                set(&datalabels, "formatter", labels.as_ref())?;
                callbacks.push(labels);

                let tip = callback(|context, _| tooltip_line(get(&context, "label"), get(&context, "parsed")));
                set(&tooltip_callbacks, "label", tip.as_ref())?;
                callbacks.push(tip);
            }
            ChartKind::HorizontalBar => {
                let labels = callback(|value, _| currency_text(&value));
                set(&datalabels, "formatter", labels.as_ref())?;
                callbacks.push(labels);

                let tip = callback(|context, _| {
                    tooltip_line(get_path(&context, &["dataset", "label"]), get_path(&context, &["parsed", "x"]))
                });
                set(&tooltip_callbacks, "label", tip.as_ref())?;
                callbacks.push(tip);

                let ticks = get_path(config, &["options", "scales", "x", "ticks"]);
                let tick = callback(|value, _| currency_text(&value));
                set(&ticks, "callback", tick.as_ref())?;
                callbacks.push(tick);
            }
        }
        Ok(callbacks)
    }
}

impl ChartRenderer for ChartJs {
    fn render_chart(
        &self,
        canvas_id: &str,
        kind: ChartKind,
        data: &ChartData,
        palette: &ChartPalette,
    ) -> AppResult<()> {
        self.destroy(canvas_id);

        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| AppError::Render(format!("no canvas named {}", canvas_id)))?;

        let config = js_sys::JSON::parse(&chart_config(kind, data, palette).to_string())
            .map_err(|e| js_error("chart config", e))?;
        let callbacks = self.attach_callbacks(&config, kind, data.total())?;
        let chart = Chart::new(&canvas, &config).map_err(|e| js_error(canvas_id, e))?;

        log::debug!("rendered {:?} chart on #{}", kind, canvas_id);
        self.instances.borrow_mut().insert(
            canvas_id.to_string(),
            Instance {
                chart,
                _callbacks: callbacks,
            },
        );
        Ok(())
    }

    fn destroy(&self, canvas_id: &str) {
        if let Some(instance) = self.instances.borrow_mut().remove(canvas_id) {
            instance.chart.destroy();
        }
    }
}

impl Drop for ChartJs {
    fn drop(&mut self) {
        for (_, instance) in self.instances.borrow_mut().drain() {
            instance.chart.destroy();
        }
    }
}
