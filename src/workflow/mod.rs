pub mod course_flow;
pub mod student_ctx;

pub use course_flow::{CourseFlow, CourseOutcome};
pub use student_ctx::StudentCtx;
