//! Reusable view pieces. Pages compose these with state from `crate::state`.

pub mod banner;
pub mod chart_panel;
pub mod confirm;
pub mod edit_modal;
pub mod field;
pub mod icons;
pub mod layout;
pub mod record_form;
pub mod record_table;
pub mod stat_card;

pub use banner::BannerView;
pub use chart_panel::ChartPanel;
pub use confirm::ConfirmDialog;
pub use edit_modal::EditModal;
pub use layout::page_shell;
pub use record_form::RecordForm;
pub use record_table::RecordTable;
pub use stat_card::{StatCard, StatIcon, Tone};
