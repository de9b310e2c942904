// streamhub-commons
//
// Shared types used across the streamhub crates: identifier newtypes
// and the persisted user record.

pub mod models;

pub use models::{User, UserId, UserName, UserPatch};
