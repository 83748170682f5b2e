//! Weekly timetable layout for course sections returned by a schedule builder.
//!
//! Sections arrive with free-form day and time strings. [`renderer::render`]
//! turns them into five day columns of pixel-positioned blocks on a fixed
//! half-hour grid, dropping anything it cannot place instead of failing.

pub mod clock;
pub mod config;
pub mod conflicts;
pub mod days;
pub mod error;
pub mod input;
pub mod layout;
pub mod models;
pub mod projector;
pub mod renderer;
pub mod report;

pub use days::Weekday;
pub use layout::{EventBox, GridConfig};
pub use models::Section;
pub use projector::{project, DropReason, Projection, TimedEvent, Window};
pub use renderer::{render, Timetable};
