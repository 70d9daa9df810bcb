pub mod enums;
pub mod task;

pub use enums::TaskStatus;
pub use task::{ActiveTask, CompletedTask, NewTask, PausedTask, TaskId, TaskInfo};
