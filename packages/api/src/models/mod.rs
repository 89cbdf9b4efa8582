//! Data models shared across the client.

mod user;

pub use user::User;
