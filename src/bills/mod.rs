//! Bill domain models, recurrence expansion, and collection helpers.

pub mod bill;
pub mod category;
pub mod collection;
pub mod date_math;
pub mod recurrence;
pub mod view;

pub use bill::{parse_date, Bill, BillType};
pub use category::Category;
pub use collection::BillBook;
pub use recurrence::{expand_series, IdSource, RandomIds, RecurrenceRule};
pub use view::{group_by_due_date, summarize, DateWindow, PeriodSummary, SummaryPeriod};
