//! Wishes module - domain models, validation, services, and traits.

mod wishes_model;
mod wishes_service;
mod wishes_traits;
mod wishes_validation;

#[cfg(test)]
pub(crate) mod wishes_service_tests;

pub use wishes_model::{
    FlagInput, NewWish, PriceInput, Wish, WishDefaults, WishInput, WishPatch,
};
pub use wishes_service::WishService;
pub use wishes_traits::{WishRepositoryTrait, WishServiceTrait};
pub use wishes_validation::{is_valid_reference, normalize_new, normalize_patch, parse_price};
