//! tabview
//!
//! A searchable, sortable, paginated table engine over caller-owned rows,
//! plus a terminal browser for JSON records built on it.
//!
//! The engine is pure: [`state::DataView`] recomputes
//! Filter → Sort → Paginate → Stats from the host's rows on every call.
//! The terminal shell lives in [`view`].

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod source;
pub mod state;
pub mod view;
