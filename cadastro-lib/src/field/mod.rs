//! Form fields, their declared constraints and validity state.

mod constraints;
mod kind;
mod state;
mod validity;

pub use constraints::{Constraints, DATE_FORMAT, InputType, Pattern, parse_date};
pub use kind::FieldKind;
pub use state::{FieldId, FormField};
pub use validity::{ValidityFlag, ValidityState};
