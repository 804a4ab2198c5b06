pub mod auth;
pub use auth::{Claims, CreateUserPayload, Credentials, TokenResponse, User};
pub mod catalog;
pub use catalog::{Item, ItemCategory};
pub mod dashboard;
pub mod event;
pub use event::{EventDraft, EventInfo, InfoField};
pub mod order;
pub use order::{LineItem, OrderHeader, OrderPayload, OrderStatus, Pedido};
pub mod payment;
pub use payment::PaymentRedirect;
