pub mod garment_handlers;
pub mod handlers;
pub mod method_override;
pub mod routes;
pub mod views;

pub use garment_handlers::*;
pub use handlers::*;
pub use method_override::*;
pub use routes::*;
