pub mod clock;
pub mod evaluator;
pub mod refresher;

pub use crate::domain::model::{
    Classification, Locale, StatusSnapshot, StoreHoursConfig, StoreStatus,
};
pub use crate::domain::ports::{Clock, ConfigProvider, StatusRenderer, Storage};
pub use crate::utils::error::Result;
pub use clock::{FixedClock, SystemClock};
