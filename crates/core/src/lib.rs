pub mod auth;
pub mod blob;
pub mod contact;
pub mod content;
pub mod error;
pub mod file;
pub mod resource;
pub mod store;
pub mod subscriber;
pub mod validate;
