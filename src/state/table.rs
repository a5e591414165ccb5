//! Display rows for the record browser.

use serde_json::Value;

use crate::format::{self, Viewport};
use crate::model::schema::{columns_for, recent_columns_for, Align, CellFormat, Column, SEARCH_COLUMNS};
use crate::model::{Record, RecordKind, TaggedRecord};

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub id: Option<i64>,
    pub kind: RecordKind,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub heading: String,
    pub headers: Vec<(&'static str, Align)>,
    pub rows: Vec<Row>,
}

pub fn heading(searching: bool, empty: bool) -> String {
    let base = if searching { "Search Results" } else { "Table Data" };
    if empty {
        format!("{} (No Data)", base)
    } else {
        base.to_string()
    }
}

fn format_cell(column: &Column, value: Option<&Value>, viewport: Viewport) -> String {
    match column.format {
        CellFormat::Plain => format::plain(value),
        CellFormat::Currency => format::currency_value(value),
        CellFormat::Date => format::date(value.and_then(Value::as_str).unwrap_or(""), viewport),
        CellFormat::Enum => format::enum_label(value.and_then(Value::as_str)),
    }
}

/// Cells of one record under its own kind's column layout.
pub fn record_cells(columns: &[Column], record: &Record, viewport: Viewport) -> Vec<Cell> {
    columns
        .iter()
        .map(|column| Cell {
            text: format_cell(column, record.get(column.key), viewport),
            align: column.align,
        })
        .collect()
}

fn search_cell(column: &Column, row: &TaggedRecord, viewport: Viewport) -> String {
    let record = &row.record;
    match column.key {
        "source" => format::kind_title(row.source.slug()),
        "date" => format::date(record.date_str().unwrap_or(""), viewport),
        "description" => match row.source {
            RecordKind::Income => format!(
                "Tours: {}, Transfers: {}",
                format::currency_value(record.get("tours_revenue_eur")),
                format::currency_value(record.get("transfers_revenue_eur"))
            ),
            _ => format::plain(record.get("description")),
        },
        "amount" => match row.source {
            RecordKind::Income => {
                let total = record
                    .number("tours_revenue_eur")
                    .zip(record.number("transfers_revenue_eur"))
                    .map(|(t, x)| t + x);
                match total {
                    Some(sum) => format::currency(sum),
                    None => format::currency_value(None),
                }
            }
            RecordKind::DailyExpenses => format::currency_value(record.get("amount")),
            RecordKind::FixedCosts => format::currency_value(record.get("amount_eur")),
        },
        "payment_method" => match record.text("payment_method") {
            Some(pm) if !pm.is_empty() => pm.to_string(),
            _ => "-".to_string(),
        },
        key => format::plain(record.get(key)),
    }
}

/// Builds the visible table. Search results share one layout across kinds.
pub fn build(
    rows: &[TaggedRecord],
    table_kind: RecordKind,
    searching: bool,
    viewport: Viewport,
) -> TableView {
    let columns = if searching {
        SEARCH_COLUMNS
    } else {
        columns_for(table_kind)
    };
    let rendered = rows
        .iter()
        .map(|row| {
            let cells = if searching {
                columns
                    .iter()
                    .map(|c| Cell {
                        text: search_cell(c, row, viewport),
                        align: c.align,
                    })
                    .collect()
            } else {
                record_cells(columns, &row.record, viewport)
            };
            Row {
                id: row.id(),
                kind: row.source,
                cells,
            }
        })
        .collect();

    TableView {
        heading: heading(searching, rows.is_empty()),
        headers: columns.iter().map(|c| (c.header, c.align)).collect(),
        rows: rendered,
    }
}

/// Compact table of the latest entries of one kind, for the dashboard.
pub fn recent(kind: RecordKind, records: &[Record], viewport: Viewport) -> TableView {
    let columns = recent_columns_for(kind);
    TableView {
        heading: format!("Recent {}", kind.label()),
        headers: columns.iter().map(|c| (c.header, c.align)).collect(),
        rows: records
            .iter()
            .map(|record| Row {
                id: record.id(),
                kind,
                cells: record_cells(columns, record, viewport),
            })
            .collect(),
    }
}
