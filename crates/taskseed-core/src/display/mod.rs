//! Markdown formatting for run output and task listings.
//!
//! Domain types implement [`std::fmt::Display`] directly; collections are
//! formatted through newtype wrappers such as [`Tasks`] and [`Events`]. All
//! output is markdown, rendered by the CLI's terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  RunEvent, Task │    │  Display impls  │    │    Markdown     │
//! │   RunReport     │───▶│  & wrappers     │───▶│     output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use taskseed_core::{display::Tasks, models::Task};
//!
//! let task = Task {
//!     uid: "abc".to_string(),
//!     summary: "Water the plants".to_string(),
//!     due_date: Some("2023-01-09".to_string()),
//!     ..Task::default()
//! };
//!
//! let output = Tasks(vec![task]).to_string();
//! assert!(output.contains("Water the plants"));
//! assert!(output.contains("2023-01-09"));
//! ```

mod events;
mod tasks;

pub use events::Events;
pub use tasks::Tasks;
