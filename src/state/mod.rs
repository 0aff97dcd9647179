//! Application state module

mod app_state;
mod forms;
mod locale;
mod selection;
mod validation;

pub use app_state::*;
pub use forms::*;
pub use locale::*;
pub use selection::*;
pub use validation::*;
