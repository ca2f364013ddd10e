pub mod cooking;
pub mod currency;
pub mod number_scale;
pub mod units;

pub use currency::{CurrencyConverter, HttpRateProvider, RateSource, RateTable};
pub use units::{convert, Category};
