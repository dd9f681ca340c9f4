pub mod audit;
pub mod due_format;
pub mod emoji;
pub mod enums;
pub mod task;
pub mod views;

pub use due_format::{clock_label, format_due};
pub use emoji::classify;
pub use enums::{FormField, UiMode, ViewMode};
pub use task::{default_roster, Due, Person, Task};
pub use views::{select, BoardView, CardView, LaneView, NO_TASKS_PLACEHOLDER};
