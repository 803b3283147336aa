//! Core business logic: pure calculations and the models/traits the
//! provider and CLI layers build on.

pub mod calculator;
pub mod config;
pub mod country;
pub mod currency;
pub mod log;
pub mod opportunity;
pub mod profile;
pub mod progress;

// Re-export main types for cleaner imports
pub use calculator::{DerivedMetrics, compute};
pub use country::{Country, CountryDirectory, CountryStatus};
pub use currency::{CurrencySpec, CurrencyTable};
pub use opportunity::{Opportunity, OpportunityCatalog};
pub use profile::{ProfileSource, UserProfile};
pub use progress::progress_pct;
