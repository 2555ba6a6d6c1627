//! Screen rendering and input handling.

mod dashboard;
mod exercise;
mod picker;

pub use dashboard::DashboardScreen;
pub use exercise::ExerciseScreen;
pub use picker::{PickerAction, PickerScreen};
