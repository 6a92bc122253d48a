pub mod manager;
pub mod token;

pub use manager::{Credentials, TokenManager};
pub use token::Token;
