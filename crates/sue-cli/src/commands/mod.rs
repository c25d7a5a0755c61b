pub mod ask;
pub mod chat;
pub mod fetch;
pub mod search;
