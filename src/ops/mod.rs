pub mod draft_ops;
pub mod reminder_ops;
pub mod search;
pub mod view_ops;
