mod complete;
mod create;
mod delete;
mod get;
mod list;
mod update;

pub use complete::task_complete;
pub use create::task_create;
pub use delete::task_delete;
pub use get::task_get;
pub use list::task_list;
pub use update::task_update;
