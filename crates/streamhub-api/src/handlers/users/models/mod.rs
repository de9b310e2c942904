//! Request and response models for the user endpoints.
//!
//! Wire format is camelCase; token fields in bodies use the same names
//! as the corresponding cookies.

mod change_password_request;
mod error_response;
mod login_request;
mod login_response;
mod refresh_request;
mod refresh_response;
mod register_request;
mod user_info;

pub use change_password_request::ChangePasswordRequest;
pub use error_response::AuthErrorResponse;
pub use login_request::LoginRequest;
pub use login_response::LoginResponse;
pub use refresh_request::RefreshRequest;
pub use refresh_response::RefreshResponse;
pub use register_request::RegisterRequest;
pub use user_info::UserInfo;
