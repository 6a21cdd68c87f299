//! # CLI Module
//!
//! Command implementations behind the `tunefeed` binary:
//!
//! - [`serve`] - runs the web front-end
//! - [`users`] - lists the accounts in the local user store
//!
//! Loading `.env` and parsing the environment happens once in `main`;
//! these functions receive the result.

mod serve;
mod users;

pub use serve::serve;
pub use users::users;
