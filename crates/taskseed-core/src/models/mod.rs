//! Data models for rules, schedules and tasks.
//!
//! Display implementations for these models live in [`crate::display`] to
//! keep data structures apart from presentation.
//!
//! # Examples
//!
//! ```rust
//! use taskseed_core::models::{Rule, Schedule, Weekday};
//!
//! let rule: Rule = serde_yaml::from_str(
//!     "id: trash\ntitle: Take out the trash\nschedule:\n  kind: weekly\n  weekdays: [Monday]\n",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     rule.schedule,
//!     Schedule::Weekly { weekdays: vec![Weekday::Monday] }
//! );
//! ```

pub mod rule;
pub mod schedule;
pub mod task;


pub use rule::Rule;
pub use schedule::{Schedule, Weekday};
pub use task::{DuePreference, NewTask, Task};
