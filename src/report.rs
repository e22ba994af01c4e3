use std::io::Read;

use serde::Serialize;

use crate::analyzer::{compute_daily_series, summarize, DailyCount, PrioritySlaBucket};
use crate::config::ReportConfig;
use crate::error::AppError;
use crate::filter;
use crate::parser::{parse_csv_reader, Ticket};

/// Complete output of one report run: the daily series and the
/// priority/SLA summary, both computed from the same filtered rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReport {
    pub daily: Vec<DailyCount>,
    pub summary: Vec<PrioritySlaBucket>,
    /// Number of tickets matching the filters; the summary counts sum to
    /// this and every daily total is drawn from the same set.
    pub total_tickets: usize,
}

/// Run one report over an already-loaded ticket set: filter once, then
/// derive both outputs. Recomputed from scratch on every call; nothing is
/// cached between runs.
pub fn generate_report(tickets: &[Ticket], config: &ReportConfig) -> TicketReport {
    let filtered = filter::apply(tickets, config);
    log::info!(
        "report: {} of {} tickets match filters, window {} → {}",
        filtered.len(),
        tickets.len(),
        config.window.start,
        config.window.end,
    );

    TicketReport {
        daily: compute_daily_series(&filtered, config.window),
        summary: summarize(&filtered),
        total_tickets: filtered.len(),
    }
}

/// Convenience entry point for a host that holds the raw CSV bytes: parse,
/// then report. All failures come back as `AppError`; nothing panics on
/// user input.
pub fn generate_report_from_reader<R: Read>(
    reader: R,
    config: &ReportConfig,
) -> Result<TicketReport, AppError> {
    let parsed = parse_csv_reader(reader)?;
    Ok(generate_report(&parsed.tickets, config))
}
