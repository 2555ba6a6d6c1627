//! Terminal UI: the interactive workout flow.
//!
//! Dashboard → exercise picker → cadence run → save-and-next → summary.
//! Management surfaces (CRUD, history, transfer) live in the CLI.

mod app;
mod screens;

pub use app::run;
