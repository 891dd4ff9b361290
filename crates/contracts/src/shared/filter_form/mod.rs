//! Контракт динамической формы фильтров: схема полей, значения и жизненный цикл формы.
//!
//! Crate-level types are target-independent so the rules can be tested natively,
//! outside of wasm.

pub mod provider;
pub mod schema;
pub mod state;
pub mod value;

pub use provider::*;
pub use schema::*;
pub use state::*;
pub use value::*;
