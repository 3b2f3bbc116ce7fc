pub mod notice;
pub mod task;
pub mod text;

pub use notice::{Notice, NoticeLevel, Notices};
pub use task::{
    TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks, UiEventReceiver,
    UiEventSender,
};
pub use text::{format_bytes, truncate_end_with_ellipsis, truncate_start_with_ellipsis};
