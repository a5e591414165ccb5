mod dashboard;
mod data_management;
mod login;
mod not_found;
mod register_expenses;
mod register_income;
mod registration;

pub use dashboard::DashboardPage;
pub use data_management::DataManagementPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register_expenses::RegisterExpensesPage;
pub use register_income::RegisterIncomePage;
