mod empty_state;
mod filter_bar;
mod notice_banner;
mod progress_summary;
mod sort_select;
mod task_card;
mod task_edit_form;
mod task_fields;
mod task_form;
mod task_list;

pub use empty_state::EmptyState;
pub use filter_bar::FilterBar;
pub use notice_banner::NoticeBanner;
pub use progress_summary::ProgressSummary;
pub use sort_select::SortSelect;
pub use task_card::TaskCard;
pub use task_edit_form::TaskEditForm;
pub use task_fields::TaskFields;
pub use task_form::TaskForm;
pub use task_list::TaskList;
