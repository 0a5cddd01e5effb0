pub mod audit_log;
pub mod calculator;
pub mod carriers;
pub mod products;
pub mod settings;

pub use audit_log::AuditLogPage;
pub use calculator::CalculatorPage;
pub use carriers::CarriersPage;
pub use products::ProductsPage;
pub use settings::SettingsPage;
