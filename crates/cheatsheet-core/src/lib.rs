pub mod api;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod search;
pub mod slug;
