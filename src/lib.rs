//! Daily ticket-flow reporting over a support-ticket CSV export.
//!
//! Given one CSV export and an immutable [`ReportConfig`], this crate derives
//! three daily series — tickets opened, tickets closed, and outstanding
//! backlog — over an inclusive date window, plus a (priority, SLA status)
//! breakdown. Backlog is a per-day point-in-time snapshot: a ticket counts on
//! day `d` when it was created on or before `d` and not yet closed at end of
//! day `d`. The computation is single-shot and in-memory; file upload and
//! rendering belong to the host.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod filter;
pub mod parser;
pub mod report;

pub use analyzer::{compute_daily_series, summarize, DailyCount, PrioritySlaBucket};
pub use config::{DateWindow, ReportConfig, Selection};
pub use error::AppError;
pub use parser::{parse_csv, parse_csv_reader, Closure, ParseOutput, ParseWarning, Ticket};
pub use report::{generate_report, generate_report_from_reader, TicketReport};
