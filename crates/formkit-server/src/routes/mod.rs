pub mod events;
pub mod form;
pub mod messages;
pub mod page;
