use std::collections::BTreeMap;

use serde::Serialize;

use crate::parser::Ticket;

/// One (priority, SLA status) group of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySlaBucket {
    pub priority: String,
    pub sla_status: String,
    pub count: u32,
    /// Share of the filtered total, rounded to 2 decimals. Sums to 100
    /// across all buckets within rounding.
    pub percentage: f64,
}

/// Group the filtered ticket set by (priority, SLA status) with counts and
/// percentages. Bucket order is deterministic (sorted by priority, then
/// SLA status). An empty input yields an empty result, never a division
/// by zero.
pub fn summarize(tickets: &[Ticket]) -> Vec<PrioritySlaBucket> {
    let total = tickets.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for t in tickets {
        *counts
            .entry((t.priority.as_str(), t.sla_status.as_str()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((priority, sla_status), count)| PrioritySlaBucket {
            priority: priority.to_string(),
            sla_status: sla_status.to_string(),
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
