mod user;
mod user_id;
mod user_name;

pub use user::{User, UserPatch};
pub use user_id::UserId;
pub use user_name::UserName;
