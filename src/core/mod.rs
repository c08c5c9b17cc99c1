pub mod assembler;
pub mod engine;
pub mod hours;
pub mod series;
pub mod tz;

pub use assembler::{ReportAssembler, RunOutcome, StoreFailure};
pub use engine::{StoreUptime, WindowTotals, compute_store_uptime};
pub use hours::BusinessHoursIndex;
pub use series::ObservationSeries;
pub use tz::TimezoneResolver;
