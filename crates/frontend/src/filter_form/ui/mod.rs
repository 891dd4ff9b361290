pub mod fields;
pub mod form;

pub use form::DynamicFilter;
