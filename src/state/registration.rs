//! New-record forms for income, daily expenses and fixed costs.

use std::rc::Rc;

use chrono::NaiveDate;
use log::{error, info};
use serde_json::{Map, Value};
use yew::Reducible;

use super::banner::Banner;
use super::form::{self, parse_number, FieldValue};
use crate::api::FinanceApi;
use crate::error::{AppError, AppResult};
use crate::model::schema::{fields_for, FieldInput};
use crate::model::RecordKind;

pub const INCOME_INVALID: &str =
    "Please fill in all fields correctly for Income (amounts and hours must be non-negative).";

/// Which expense form the toggle on the expenses page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpenseType {
    Daily,
    Fixed,
}

impl ExpenseType {
    pub fn kind(self) -> RecordKind {
        match self {
            ExpenseType::Daily => RecordKind::DailyExpenses,
            ExpenseType::Fixed => RecordKind::FixedCosts,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            ExpenseType::Daily => "daily",
            ExpenseType::Fixed => "fixed",
        }
    }

    pub fn from_value(value: &str) -> Self {
        if value == "fixed" {
            ExpenseType::Fixed
        } else {
            ExpenseType::Daily
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationForm {
    pub kind: RecordKind,
    pub fields: Vec<FieldValue>,
    pub banner: Option<Banner>,
}

fn default_value(input: FieldInput, today: NaiveDate) -> String {
    match input {
        FieldInput::Date => today.format("%Y-%m-%d").to_string(),
        FieldInput::Currency | FieldInput::Hours => "0".to_string(),
        FieldInput::Text | FieldInput::Select(_) => String::new(),
    }
}

fn blank_fields(kind: RecordKind, today: NaiveDate) -> Vec<FieldValue> {
    fields_for(kind)
        .iter()
        .map(|spec| FieldValue::new(*spec, default_value(spec.input, today)))
        .collect()
}

impl RegistrationForm {
    /// Today's date in date inputs, zero in numeric ones.
    pub fn new(kind: RecordKind, today: NaiveDate) -> Self {
        Self {
            kind,
            fields: blank_fields(kind, today),
            banner: None,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        form::set_field(&mut self.fields, name, value);
    }

    #[cfg(test)]
    pub fn value(&self, name: &str) -> &str {
        form::field_value(&self.fields, name).unwrap_or("")
    }

    fn invalid(&self) -> AppError {
        match self.kind {
            RecordKind::Income => AppError::Validation(INCOME_INVALID.to_string()),
            kind => AppError::Validation(format!(
                "Please fill in all fields correctly for {} (amount must be non-negative).",
                kind.singular()
            )),
        }
    }

    /// Checks the minimum the backend cannot be trusted to explain well:
    /// filled-in fields and non-negative numbers.
    pub fn validate(&self) -> AppResult<Map<String, Value>> {
        let ok = self.fields.iter().all(|field| {
            if field.spec.input.is_numeric() {
                matches!(parse_number(&field.value), Some(n) if n >= 0.0)
            } else {
                !field.is_missing()
            }
        });
        if ok {
            Ok(form::payload(&self.fields))
        } else {
            Err(self.invalid())
        }
    }

    /// Posts the form. Success clears it back to its defaults.
    pub async fn submit<A: FinanceApi + ?Sized>(mut self, api: &A, today: NaiveDate) -> Self {
        let body = match self.validate() {
            Ok(body) => body,
            Err(err) => {
                self.banner = Some(Banner::error(err.to_string()));
                return self;
            }
        };
        let label = self.kind.singular();
        match api.create(self.kind, &body).await {
            Ok(()) => {
                info!("registered a new {}", label);
                self.fields = blank_fields(self.kind, today);
                self.banner = Some(Banner::success(format!("{} registered successfully!", label)));
            }
            Err(err) => {
                error!("registering {} failed: {}", label, err);
                self.banner = Some(Banner::failure(&format!("Error registering {}", label), &err));
            }
        }
        self
    }
}

/// Changes applied to the newest form a page holds, so a late banner
/// timeout never rolls typing back.
#[derive(Debug)]
pub enum FormAction {
    Set(&'static str, String),
    DismissBanner,
    /// Outcome of [`RegistrationForm::submit`].
    Submitted(RegistrationForm),
}

impl Reducible for RegistrationForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut form = (*self).clone();
        match action {
            FormAction::Set(name, value) => form.set(name, value),
            FormAction::DismissBanner => form.banner = None,
            FormAction::Submitted(next) => form = next,
        }
        Rc::new(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::fake::{Call, FakeApi};
    use futures::executor::block_on;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    #[test]
    fn defaults_are_today_and_zero() {
        let form = RegistrationForm::new(RecordKind::Income, today());
        assert_eq!(form.value("income_date"), "2024-06-01");
        assert_eq!(form.value("tours_revenue_eur"), "0");
        assert_eq!(form.value("hours_worked"), "0");
    }

    #[test]
    fn income_rejects_negative_amounts() {
        let api = FakeApi::new();
        let mut form = RegistrationForm::new(RecordKind::Income, today());
        form.set("tours_revenue_eur", "-5");
        let form = block_on(form.submit(&api, today()));
        assert!(api.calls().is_empty());
        assert_eq!(form.banner.map(|b| b.message), Some(INCOME_INVALID.to_string()));
    }

    #[test]
    fn income_rejects_non_numbers() {
        let mut form = RegistrationForm::new(RecordKind::Income, today());
        form.set("hours_worked", "");
        assert!(form.validate().is_err());
    }

    #[test]
    fn fixed_cost_recipient_is_optional() {
        let mut form = RegistrationForm::new(RecordKind::FixedCosts, today());
        form.set("amount_eur", "120");
        form.set("description", "Insurance");
        form.set("cost_frequency", "Annual");
        form.set("category", "Insurance");
        form.set("payment_method", "Bank Transfer");
        let body = form.validate().expect("valid");
        assert_eq!(body["amount_eur"], json!(120.0));
        assert_eq!(body["recipient"], json!(""));
    }

    #[test]
    fn daily_expense_needs_a_category() {
        let mut form = RegistrationForm::new(RecordKind::DailyExpenses, today());
        form.set("amount", "10");
        form.set("description", "Fuel");
        form.set("payment_method", "Cash");
        let err = form.validate().expect_err("category missing");
        assert_eq!(
            err.to_string(),
            "Please fill in all fields correctly for Daily Expense (amount must be non-negative)."
        );
    }

    #[test]
    fn successful_submit_posts_and_resets() {
        let api = FakeApi::new();
        let mut form = RegistrationForm::new(RecordKind::Income, today());
        form.set("tours_revenue_eur", "150");
        form.set("transfers_revenue_eur", "30.5");
        form.set("hours_worked", "7");
        form.set("income_date", "2024-05-30");
        let form = block_on(form.submit(&api, today()));

        match api.calls().as_slice() {
            [Call::Create(RecordKind::Income, body)] => {
                assert_eq!(body["tours_revenue_eur"], json!(150.0));
                assert_eq!(body["income_date"], json!("2024-05-30"));
            }
            other => panic!("unexpected calls: {:?}", other),
        }
        assert_eq!(form.value("income_date"), "2024-06-01");
        assert_eq!(form.value("tours_revenue_eur"), "0");
        assert_eq!(
            form.banner.map(|b| b.message),
            Some("Income registered successfully!".to_string())
        );
    }

    #[test]
    fn server_detail_is_shown_and_form_kept() {
        let api = FakeApi::new();
        api.fail(
            &endpoints::collection(RecordKind::Income),
            AppError::http(400, "Bad Request", Some(&json!({"detail": "Income for this date already exists"}))),
        );
        let mut form = RegistrationForm::new(RecordKind::Income, today());
        form.set("tours_revenue_eur", "10");
        let form = block_on(form.submit(&api, today()));
        assert_eq!(form.value("tours_revenue_eur"), "10");
        assert_eq!(
            form.banner.map(|b| b.message),
            Some("Error registering Income: Income for this date already exists".to_string())
        );
    }

    #[test]
    fn network_failure_is_generic() {
        let api = FakeApi::new();
        api.fail(
            &endpoints::collection(RecordKind::DailyExpenses),
            AppError::Network("Failed to fetch".into()),
        );
        let mut form = RegistrationForm::new(RecordKind::DailyExpenses, today());
        for (name, value) in [
            ("amount", "3"),
            ("description", "Water"),
            ("category", "Food"),
            ("payment_method", "Cash"),
        ] {
            form.set(name, value);
        }
        let form = block_on(form.submit(&api, today()));
        assert_eq!(
            form.banner.map(|b| b.message),
            Some("Network error: Failed to fetch".to_string())
        );
    }

    #[test]
    fn expense_toggle_values() {
        assert_eq!(ExpenseType::from_value("fixed").kind(), RecordKind::FixedCosts);
        assert_eq!(ExpenseType::from_value("daily"), ExpenseType::Daily);
        assert_eq!(ExpenseType::Fixed.value(), "fixed");
    }

    #[test]
    fn dismissing_the_banner_keeps_newer_typing() {
        let api = FakeApi::new();
        let mut form = RegistrationForm::new(RecordKind::Income, today());
        form.set("tours_revenue_eur", "150");
        let submitted = block_on(form.submit(&api, today()));

        let form = Rc::new(RegistrationForm::new(RecordKind::Income, today()))
            .reduce(FormAction::Submitted(submitted))
            .reduce(FormAction::Set("tours_revenue_eur", "75".into()))
            .reduce(FormAction::DismissBanner);
        assert!(form.banner.is_none());
        assert_eq!(form.value("tours_revenue_eur"), "75");
    }
}
