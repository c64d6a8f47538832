//! Interchange module - CSV export and restore of the whole wishlist.

mod csv_codec;
mod interchange_service;
mod interchange_traits;

pub use csv_codec::{parse_csv, render_csv, CSV_HEADERS};
pub use interchange_service::InterchangeService;
pub use interchange_traits::InterchangeServiceTrait;
