pub mod item_loader;
pub mod normalization;

pub use item_loader::{FetchFailure, FetchReport, ItemLoader};
pub use normalization::CrmRecord;
