pub mod auth;
pub use auth::AuthService;
pub mod catalog;
pub use catalog::{CatalogService, CatalogSource};
pub mod dashboard;
pub use dashboard::DashboardService;
pub mod orders;
pub use orders::{OrderService, OrderSink};
pub mod pricing;
pub use pricing::{PricingService, PricingSource};
