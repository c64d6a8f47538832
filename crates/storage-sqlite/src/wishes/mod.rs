//! SQLite storage implementation for wishes.

mod model;
mod repository;


pub use model::{NewWishDB, WishChangesetDB, WishDB};
pub use repository::WishRepository;
