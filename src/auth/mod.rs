mod current_user;
mod token_validator;

pub use current_user::CurrentUser;
pub use token_validator::{StaticTokenValidator, TokenValidator};
