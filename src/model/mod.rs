pub mod common;
pub mod filter;
pub mod garment;
pub mod product;

pub use common::*;
pub use filter::*;
pub use garment::*;
pub use product::*;
