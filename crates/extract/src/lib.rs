mod consts;
pub mod error;
mod extract;
mod markdown;
pub mod models;

pub use crate::extract::Extractor;
pub use crate::markdown::convert;
