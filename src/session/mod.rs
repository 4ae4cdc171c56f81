//! One lesson attempt: the in-memory entry accumulator and the flow
//! that drives it from quiz generation to profile update

pub mod lesson;
pub mod recorder;

pub use lesson::LessonSession;
pub use recorder::SessionRecorder;
