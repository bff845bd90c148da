pub mod services;
pub mod time;
pub mod tracker;
pub mod utils;
pub mod view;

pub use time::{Clock, SystemClock};
pub use tracker::BudgetTracker;
pub use view::{ActivePeriod, PeriodView, View};
