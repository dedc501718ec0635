pub mod completed_task_list;
pub mod date_picker;
pub mod history_timeline;
pub mod task_list;
pub mod task_row;
pub mod task_tag_badge;

pub use completed_task_list::CompletedTaskList;
pub use date_picker::DatePicker;
pub use history_timeline::HistoryTimeline;
pub use task_list::TaskList;
pub use task_row::TaskRow;
pub use task_tag_badge::TaskTagBadge;
