use crate::config::ReportConfig;
use crate::parser::Ticket;

/// Restrict the ticket set to the configured types, organizations and
/// creation-date window. Runs once per report so the daily series and the
/// priority/SLA summary are computed from the same rows.
///
/// Tickets with an unknown creation date never match the window and are
/// therefore excluded here, not deeper in the engine.
pub fn apply(tickets: &[Ticket], config: &ReportConfig) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| {
            config.types.matches(&t.ticket_type)
                && config.organizations.matches(&t.organization)
                && t.created_at.is_some_and(|d| config.window.contains(d))
        })
        .cloned()
        .collect()
}
