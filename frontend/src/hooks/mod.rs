pub mod use_availability;
pub mod use_periodic_refresh;

pub use use_availability::use_availability;
pub use use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
