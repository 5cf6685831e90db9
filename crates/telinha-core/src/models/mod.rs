mod chat;
mod movie;
mod profile;

pub use chat::{ChatMessage, ChatRole};
pub use movie::{Episode, MediaSource, Movie};
pub use profile::{avatar_for, Profile};
