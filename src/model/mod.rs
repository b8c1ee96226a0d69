//! Domain model types (pure).
//!
//! Cell values, column declarations, JSON records and key actions.

pub mod column;
pub mod error;
pub mod key_action;
pub mod record;
pub mod value;

// Re-export for convenience
pub use column::{ColumnDef, ColumnLookup, ColumnRegistry};
pub use error::{AppError, InputError, RegistryError};
pub use key_action::KeyAction;
pub use record::{Record, infer_column_ids, json_to_cell, record_columns};
pub use value::{CellValue, NullableOrdering, locale_cmp};
