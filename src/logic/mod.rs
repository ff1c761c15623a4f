pub mod cascade;
pub mod garments;
pub mod products;

pub use cascade::*;
pub use garments::*;
pub use products::*;
