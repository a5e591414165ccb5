//! Per-kind form fields and table columns.

use super::record::RecordKind;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Garage",
    "Tuk Maintenance",
    "Diesel",
    "Food",
    "Electricity",
    "Others",
    "Insurance",
    "Licenses",
    "Vehicle Purchase",
    "Marketing",
];

pub const PAYMENT_METHODS: &[&str] = &["Cash", "Bank Transfer", "Debit Card"];

pub const COST_FREQUENCIES: &[&str] = &["Annual", "Monthly", "One-Off", "Initial Investment"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldInput {
    Currency,
    Text,
    Select(&'static [&'static str]),
    Date,
    Hours,
}

impl FieldInput {
    pub fn html_type(self) -> &'static str {
        match self {
            FieldInput::Currency | FieldInput::Hours => "number",
            FieldInput::Text => "text",
            FieldInput::Select(_) => "select",
            FieldInput::Date => "date",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldInput::Currency | FieldInput::Hours)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, input: FieldInput) -> FieldSpec {
    FieldSpec { name, label, input, required: true }
}

const DAILY_EXPENSE_FIELDS: &[FieldSpec] = &[
    field("amount", "Amount (€)", FieldInput::Currency),
    field("description", "Description", FieldInput::Text),
    field("category", "Category", FieldInput::Select(EXPENSE_CATEGORIES)),
    field("cost_date", "Date", FieldInput::Date),
    field("payment_method", "Payment Method", FieldInput::Select(PAYMENT_METHODS)),
];

const FIXED_COST_FIELDS: &[FieldSpec] = &[
    field("amount_eur", "Amount (€)", FieldInput::Currency),
    field("description", "Description", FieldInput::Text),
    field("cost_frequency", "Cost Type", FieldInput::Select(COST_FREQUENCIES)),
    field("category", "Category", FieldInput::Select(EXPENSE_CATEGORIES)),
    FieldSpec {
        name: "recipient",
        label: "Recipient",
        input: FieldInput::Text,
        required: false,
    },
    field("cost_date", "Date", FieldInput::Date),
    field("payment_method", "Payment Method", FieldInput::Select(PAYMENT_METHODS)),
];

const INCOME_FIELDS: &[FieldSpec] = &[
    field("income_date", "Date", FieldInput::Date),
    field("tours_revenue_eur", "Tours Revenue (€)", FieldInput::Currency),
    field("transfers_revenue_eur", "Transfers Revenue (€)", FieldInput::Currency),
    field("hours_worked", "Hours Worked", FieldInput::Hours),
];

pub fn fields_for(kind: RecordKind) -> &'static [FieldSpec] {
    match kind {
        RecordKind::DailyExpenses => DAILY_EXPENSE_FIELDS,
        RecordKind::FixedCosts => FIXED_COST_FIELDS,
        RecordKind::Income => INCOME_FIELDS,
    }
}

/// Field names sent as numbers rather than strings on update.
pub fn is_numeric_field(name: &str) -> bool {
    name.contains("amount")
        || name.contains("revenue")
        || name.contains("hours_worked")
        || name.contains("eur")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn class(self) -> &'static str {
        match self {
            Align::Left => "text-left",
            Align::Center => "text-center",
            Align::Right => "text-right",
        }
    }
}

/// How a cell value is turned into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFormat {
    Plain,
    Currency,
    Date,
    Enum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
    pub align: Align,
    pub format: CellFormat,
}

const fn col(header: &'static str, key: &'static str, align: Align, format: CellFormat) -> Column {
    Column { header, key, align, format }
}

const DAILY_EXPENSE_COLUMNS: &[Column] = &[
    col("ID", "doc_id", Align::Center, CellFormat::Plain),
    col("Date", "cost_date", Align::Left, CellFormat::Date),
    col("Description", "description", Align::Left, CellFormat::Plain),
    col("Category", "category", Align::Left, CellFormat::Enum),
    col("Amount (€)", "amount", Align::Right, CellFormat::Currency),
    col("Payment Method", "payment_method", Align::Center, CellFormat::Enum),
];

const FIXED_COST_COLUMNS: &[Column] = &[
    col("ID", "doc_id", Align::Center, CellFormat::Plain),
    col("Date", "cost_date", Align::Left, CellFormat::Date),
    col("Description", "description", Align::Left, CellFormat::Plain),
    col("Type", "cost_frequency", Align::Left, CellFormat::Enum),
    col("Category", "category", Align::Left, CellFormat::Enum),
    col("Recipient", "recipient", Align::Left, CellFormat::Enum),
    col("Amount (€)", "amount_eur", Align::Right, CellFormat::Currency),
    col("Payment Method", "payment_method", Align::Center, CellFormat::Enum),
];

const INCOME_COLUMNS: &[Column] = &[
    col("ID", "doc_id", Align::Center, CellFormat::Plain),
    col("Date", "income_date", Align::Left, CellFormat::Date),
    col("Tours (€)", "tours_revenue_eur", Align::Right, CellFormat::Currency),
    col("Transfers (€)", "transfers_revenue_eur", Align::Right, CellFormat::Currency),
    col("Hours Worked", "hours_worked", Align::Center, CellFormat::Plain),
];

/// Cross-kind layout used for search results. Keys are resolved per source.
pub const SEARCH_COLUMNS: &[Column] = &[
    col("ID", "doc_id", Align::Center, CellFormat::Plain),
    col("Source", "source", Align::Left, CellFormat::Plain),
    col("Date", "date", Align::Left, CellFormat::Date),
    col("Description", "description", Align::Left, CellFormat::Plain),
    col("Amount (€)", "amount", Align::Right, CellFormat::Currency),
    col("Payment Method", "payment_method", Align::Center, CellFormat::Plain),
];

pub fn columns_for(kind: RecordKind) -> &'static [Column] {
    match kind {
        RecordKind::DailyExpenses => DAILY_EXPENSE_COLUMNS,
        RecordKind::FixedCosts => FIXED_COST_COLUMNS,
        RecordKind::Income => INCOME_COLUMNS,
    }
}

/// Compact columns for the dashboard's recent entries tables.
pub fn recent_columns_for(kind: RecordKind) -> &'static [Column] {
    match kind {
        RecordKind::DailyExpenses => &DAILY_EXPENSE_COLUMNS[..5],
        RecordKind::FixedCosts => &FIXED_COST_COLUMNS[..7],
        RecordKind::Income => INCOME_COLUMNS,
    }
}
