mod extract;
mod password;
mod tokens;

pub use extract::{AuthRejection, Caller};
pub use password::{hash_password, verify_password, PasswordError};
pub use tokens::{TokenAuthority, TokenError};
