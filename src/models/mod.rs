pub mod assignment;
pub mod course;
pub mod display;
pub mod student;

pub use assignment::{Assignment, Submission};
pub use course::{filter_active, Course};
pub use display::{AssignmentRow, CourseSection, DisplayNode, PanelNode};
pub use student::{Observee, Student, StudentId};
