use std::collections::BTreeSet;
use std::io::Read;
use std::time::Instant;

use crate::error::AppError;
use crate::parser::columns::{validate_columns, ColumnMap};
use crate::parser::deserializers::{parse_closure, parse_flexible_date};
use crate::parser::types::{Closure, ParseWarning, Ticket, TicketRaw};

/// Output of `parse_csv` — normalized tickets plus import metadata.
/// The distinct-value lists feed the caller's filter widgets; the unknown
/// counts make the "unparsable date" degradation visible instead of silent.
#[derive(Debug)]
pub struct ParseOutput {
    pub tickets: Vec<Ticket>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub unique_types: Vec<String>,
    pub unique_organizations: Vec<String>,
    pub unique_priorities: Vec<String>,
    pub unique_sla_statuses: Vec<String>,
    pub unknown_created_dates: usize,
    pub unknown_closure_dates: usize,
    pub parse_duration_ms: u64,
}

/// Parse a ticket CSV export from `path`.
pub fn parse_csv(path: &str) -> Result<ParseOutput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_csv_reader(std::io::BufReader::new(file))
}

/// Core parsing logic — accepts any `Read` source, useful for tests.
/// Comma-delimited, header row required, UTF-8 BOM tolerated.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    validate_columns(&col_map)?;

    // Phase 2: parse and normalize records
    let mut tickets: Vec<Ticket> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;
    let mut unknown_created = 0usize;
    let mut unknown_closure = 0usize;

    let mut unique_types: BTreeSet<String> = BTreeSet::new();
    let mut unique_organizations: BTreeSet<String> = BTreeSet::new();
    let mut unique_priorities: BTreeSet<String> = BTreeSet::new();
    let mut unique_sla_statuses: BTreeSet<String> = BTreeSet::new();

    for result in rdr.records() {
        row_idx += 1;
        // +1 for the header row
        let line = row_idx + 1;

        match result {
            Ok(record) => {
                let raw = record_to_raw(&col_map, &record);
                let (ticket, row_warnings) = normalize_ticket(&raw);
                for message in row_warnings {
                    warnings.push(ParseWarning { line, message });
                }
                if ticket.created_at.is_none() {
                    unknown_created += 1;
                }
                if ticket.closure == Closure::Unknown {
                    unknown_closure += 1;
                }
                unique_types.insert(ticket.ticket_type.clone());
                unique_organizations.insert(ticket.organization.clone());
                unique_priorities.insert(ticket.priority.clone());
                unique_sla_statuses.insert(ticket.sla_status.clone());
                tickets.push(ticket);
            }
            Err(err) => {
                warnings.push(ParseWarning {
                    line,
                    message: err.to_string(),
                });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    log::info!(
        "parsed {} tickets from {} rows ({} skipped, {} unknown creation dates, {} unknown closure dates)",
        tickets.len(),
        row_idx,
        skipped,
        unknown_created,
        unknown_closure,
    );

    Ok(ParseOutput {
        tickets,
        warnings,
        total_rows: row_idx,
        skipped_rows: skipped,
        unique_types: unique_types.into_iter().collect(),
        unique_organizations: unique_organizations.into_iter().collect(),
        unique_priorities: unique_priorities.into_iter().collect(),
        unique_sla_statuses: unique_sla_statuses.into_iter().collect(),
        unknown_created_dates: unknown_created,
        unknown_closure_dates: unknown_closure,
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> TicketRaw {
    TicketRaw {
        id: col_map.get(record, "ID du ticket").map(str::to_string),
        ticket_type: col_map.get(record, "Type").map(str::to_string),
        organization: col_map.get(record, "Organisation").map(str::to_string),
        created_at: col_map
            .get(record, "Date - Création (Europe/Paris)")
            .map(str::to_string),
        closed_at: col_map
            .get(record, "Date - Clôture (Europe/Paris)")
            .map(str::to_string),
        sla_status: col_map
            .get(record, "SLA - Clôture - Statut")
            .map(str::to_string),
        priority: col_map.get(record, "Priorité").map(str::to_string),
    }
}

/// Normalize one raw record. Never fails: unparsable dates degrade to
/// unknown (with a warning when the raw value was non-empty) and the row
/// is kept.
fn normalize_ticket(raw: &TicketRaw) -> (Ticket, Vec<String>) {
    let mut warnings = Vec::new();

    let created_raw = raw.created_at.as_deref().unwrap_or("");
    let created_at = parse_flexible_date(created_raw);
    if created_at.is_none() && !created_raw.trim().is_empty() {
        warnings.push(format!("unparsable creation date: {created_raw:?}"));
    }

    let closed_raw = raw.closed_at.as_deref().unwrap_or("");
    let closure = parse_closure(closed_raw);
    if closure == Closure::Unknown {
        warnings.push(format!("unparsable closure date: {closed_raw:?}"));
    }

    let ticket = Ticket {
        id: raw.id.as_deref().unwrap_or("").trim().to_string(),
        ticket_type: raw.ticket_type.as_deref().unwrap_or("").trim().to_string(),
        organization: raw
            .organization
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        created_at,
        closure,
        sla_status: raw.sla_status.as_deref().unwrap_or("").trim().to_string(),
        priority: raw.priority.as_deref().unwrap_or("").trim().to_string(),
    };

    (ticket, warnings)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HDR: &str = concat!(
        "ID du ticket,Type,Organisation,Date - Création (Europe/Paris),",
        "Date - Clôture (Europe/Paris),SLA - Clôture - Statut,Priorité"
    );

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn parse(csv: &str) -> ParseOutput {
        parse_csv_reader(csv.as_bytes()).unwrap()
    }

    fn parse_err(csv: &str) -> AppError {
        parse_csv_reader(csv.as_bytes()).unwrap_err()
    }

    #[test]
    fn test_basic_row() {
        let csv = format!(
            "{HDR}\n1001,Incident,Acme,2024-01-05 16:24:00,2024-01-07 09:00:00,Respecté,Haute"
        );
        let out = parse(&csv);
        assert_eq!(out.tickets.len(), 1);
        let t = &out.tickets[0];
        assert_eq!(t.id, "1001");
        assert_eq!(t.ticket_type, "Incident");
        assert_eq!(t.organization, "Acme");
        assert_eq!(t.created_at, Some(d("2024-01-05")));
        assert_eq!(t.closure, Closure::On(d("2024-01-07")));
        assert_eq!(t.sla_status, "Respecté");
        assert_eq!(t.priority, "Haute");
    }

    #[test]
    fn test_bom_utf8() {
        let csv = format!(
            "\u{FEFF}{HDR}\n1,Incident,Acme,2024-01-05 08:00:00,,Respecté,Basse"
        );
        let out = parse(&csv);
        assert_eq!(out.tickets.len(), 1, "BOM must be ignored");
    }

    #[test]
    fn test_empty_closure_means_open() {
        let csv = format!("{HDR}\n1,Incident,Acme,2024-01-05 08:00:00,,Respecté,Basse");
        let out = parse(&csv);
        assert_eq!(out.tickets[0].closure, Closure::Open);
        assert_eq!(out.unknown_closure_dates, 0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_unparsable_dates_degrade_to_unknown() {
        let csv = format!(
            "{HDR}\n\
             1,Incident,Acme,rubbish,also rubbish,Respecté,Basse\n\
             2,Demande,Acme,2024-01-06 10:00:00,,Dépassé,Haute"
        );
        let out = parse(&csv);
        // Both rows are kept; nothing is dropped for a bad date.
        assert_eq!(out.tickets.len(), 2);
        assert_eq!(out.skipped_rows, 0);
        assert_eq!(out.tickets[0].created_at, None);
        assert_eq!(out.tickets[0].closure, Closure::Unknown);
        assert_eq!(out.unknown_created_dates, 1);
        assert_eq!(out.unknown_closure_dates, 1);
        // One warning per unparsable non-empty field.
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.warnings[0].line, 2);
    }

    #[test]
    fn test_missing_required_column_error() {
        let csv = "Type,Organisation\nIncident,Acme";
        match parse_err(csv) {
            AppError::MissingColumns(cols) => {
                assert!(cols.contains(&"ID du ticket".to_string()));
                assert!(cols.contains(&"Priorité".to_string()));
            }
            e => panic!("Expected MissingColumns, got {e:?}"),
        }
    }

    #[test]
    fn test_unique_value_lists_sorted() {
        let csv = format!(
            "{HDR}\n\
             1,Incident,Zeta,2024-01-05 08:00:00,,Respecté,Basse\n\
             2,Demande,Acme,2024-01-06 08:00:00,,Dépassé,Haute\n\
             3,Incident,Acme,2024-01-07 08:00:00,,Respecté,Haute"
        );
        let out = parse(&csv);
        assert_eq!(out.unique_types, vec!["Demande", "Incident"]);
        assert_eq!(out.unique_organizations, vec!["Acme", "Zeta"]);
        assert_eq!(out.unique_priorities, vec!["Basse", "Haute"]);
        assert_eq!(out.unique_sla_statuses, vec!["Dépassé", "Respecté"]);
    }

    #[test]
    fn test_invalid_utf8_row_skipped_with_warning() {
        let mut bytes = format!(
            "{HDR}\n1,Incident,Acme,2024-01-05 08:00:00,,Respecté,Basse\n"
        )
        .into_bytes();
        bytes.extend_from_slice(b"2,Incident,\xFF\xFE,2024-01-06 08:00:00,,OK,Basse\n");
        bytes.extend_from_slice(
            "3,Demande,Acme,2024-01-07 08:00:00,,Respecté,Haute\n".as_bytes(),
        );
        let out = parse_csv_reader(bytes.as_slice()).unwrap();
        assert_eq!(out.tickets.len(), 2);
        assert_eq!(out.skipped_rows, 1);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 3);
    }

    #[test]
    fn test_quoted_fields() {
        let csv = format!(
            "{HDR}\n\"1 001\",Incident,\"Acme, Inc.\",2024-01-05 08:00:00,,Respecté,Basse"
        );
        let out = parse(&csv);
        assert_eq!(out.tickets[0].organization, "Acme, Inc.");
    }

    #[test]
    fn test_short_record_fills_with_unknowns() {
        // flexible(true): a record with fewer fields still yields a row,
        // missing trailing columns behave like empty values.
        let csv = format!("{HDR}\n1,Incident,Acme");
        let out = parse(&csv);
        assert_eq!(out.tickets.len(), 1);
        assert_eq!(out.tickets[0].created_at, None);
        assert_eq!(out.tickets[0].closure, Closure::Open);
        assert_eq!(out.tickets[0].priority, "");
    }

    #[test]
    fn test_headers_only_is_empty_file() {
        match parse_err(HDR) {
            AppError::EmptyFile => {}
            e => panic!("Expected EmptyFile, got {e:?}"),
        }
    }

    #[test]
    fn test_empty_input_errors() {
        match parse_err("") {
            AppError::EmptyFile | AppError::MissingColumns(_) | AppError::Csv(_) => {}
            e => panic!("Expected EmptyFile or related error, got {e:?}"),
        }
    }
}
