//! Dynamic filter form: store, persistence scheduling and renderer.

pub mod config;
pub mod context;
pub mod store;
pub mod ui;

pub use config::{FilterFormConfig, SaveMode};
pub use context::{provide_filter_form, use_filter_form, FilterFormContext};
pub use store::FilterStore;
