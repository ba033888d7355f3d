//! Account types exchanged with the API

mod sign_in;
mod user;

pub use sign_in::{SignInRequest, SignInResponse};
pub use user::{DeviceToken, UserProfile};
