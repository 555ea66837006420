pub mod alert;
pub mod button;
pub mod card;
pub mod input;
pub mod label;
pub mod separator;
pub mod spinner;

// Re-export so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
pub use card::*;
pub use input::*;
pub use label::*;
pub use separator::*;
pub use spinner::*;
