use chrono::NaiveDate;
use serde::Serialize;

/// Raw per-column view of one CSV record, before normalization.
#[derive(Debug, Clone)]
pub struct TicketRaw {
    pub id: Option<String>,
    pub ticket_type: Option<String>,
    pub organization: Option<String>,
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
    pub sla_status: Option<String>,
    pub priority: Option<String>,
}

/// Closure state of a ticket.
///
/// The export distinguishes an empty closure field (ticket never closed) from
/// a non-empty value that fails to parse, so the two are carried separately.
/// For backlog purposes `Open` and `Unknown` both count as "still open".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Closure field was empty: the ticket has not been closed.
    Open,
    /// Closure field was present but not a recognizable date.
    Unknown,
    /// Closed on the given calendar date.
    On(NaiveDate),
}

impl Closure {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Closure::On(d) => Some(*d),
            _ => None,
        }
    }

    /// True if the ticket still counts as open at end of day `d`.
    /// An unknown closure date counts as open.
    pub fn open_as_of(&self, d: NaiveDate) -> bool {
        match self {
            Closure::On(k) => *k > d,
            Closure::Open | Closure::Unknown => true,
        }
    }
}

/// One normalized ticket row. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Ticket {
    /// Opaque identifier; expected unique but not enforced.
    pub id: String,
    pub ticket_type: String,
    pub organization: String,
    /// `None` when the creation timestamp could not be parsed.
    pub created_at: Option<NaiveDate>,
    pub closure: Closure,
    pub sla_status: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}
