use congress_api::types::{Amendment, Bill, BillDetail, LatestAction, Member};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Longest title or description shown in a table cell.
const MAX_CELL_CHARS: usize = 60;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled, Serialize)]
struct BillRow {
    #[tabled(rename = "Bill")]
    #[serde(rename = "Bill")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Latest Action")]
    #[serde(rename = "Latest Action")]
    latest_action: String,
    #[tabled(rename = "Updated")]
    #[serde(rename = "Updated")]
    updated: String,
}

#[derive(Tabled, Serialize)]
struct BillDetailRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct MemberRow {
    #[tabled(rename = "Bioguide")]
    #[serde(rename = "Bioguide")]
    bioguide_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
}

#[derive(Tabled, Serialize)]
struct AmendmentRow {
    #[tabled(rename = "Amendment")]
    #[serde(rename = "Amendment")]
    id: String,
    #[tabled(rename = "Purpose")]
    #[serde(rename = "Purpose")]
    purpose: String,
    #[tabled(rename = "Latest Action")]
    #[serde(rename = "Latest Action")]
    latest_action: String,
}

// -- Row builders --

fn build_bill_rows(bills: &[Bill]) -> Vec<BillRow> {
    bills
        .iter()
        .map(|b| BillRow {
            id: format!("{}-{} {}", b.congress, b.bill_type, b.number),
            title: truncate(b.title.as_deref().unwrap_or_default()),
            latest_action: format_action(b.latest_action.as_ref()),
            updated: b.update_date.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_bill_detail_rows(bill: &BillDetail) -> Vec<BillDetailRow> {
    let sponsors = bill
        .sponsors
        .iter()
        .map(|s| s.full_name.clone().unwrap_or_else(|| s.bioguide_id.clone()))
        .collect::<Vec<_>>()
        .join("; ");
    vec![
        BillDetailRow {
            field: "Bill",
            value: format!("{}-{} {}", bill.congress, bill.bill_type, bill.number),
        },
        BillDetailRow {
            field: "Title",
            value: bill.title.clone().unwrap_or_default(),
        },
        BillDetailRow {
            field: "Introduced",
            value: bill.introduced_date.clone().unwrap_or_default(),
        },
        BillDetailRow {
            field: "Sponsors",
            value: sponsors,
        },
        BillDetailRow {
            field: "Cosponsors",
            value: bill
                .cosponsors
                .as_ref()
                .map(|c| c.count.to_string())
                .unwrap_or_default(),
        },
        BillDetailRow {
            field: "Latest Action",
            value: format_action(bill.latest_action.as_ref()),
        },
    ]
}

fn build_member_rows(members: &[Member]) -> Vec<MemberRow> {
    members
        .iter()
        .map(|m| MemberRow {
            bioguide_id: m.bioguide_id.clone(),
            name: m.name.clone().unwrap_or_default(),
            party: m.party_name.clone().unwrap_or_default(),
            state: m.state.clone().unwrap_or_default(),
            district: m.district.map(|d| d.to_string()).unwrap_or_default(),
        })
        .collect()
}

fn build_amendment_rows(amendments: &[Amendment]) -> Vec<AmendmentRow> {
    amendments
        .iter()
        .map(|a| AmendmentRow {
            id: format!("{}-{} {}", a.congress, a.amendment_type, a.number),
            purpose: truncate(
                a.purpose
                    .as_deref()
                    .or(a.description.as_deref())
                    .unwrap_or_default(),
            ),
            latest_action: format_action(a.latest_action.as_ref()),
        })
        .collect()
}

// -- Table output --

pub fn print_bills_table(bills: &[Bill]) {
    println!("{}", Table::new(build_bill_rows(bills)));
}

pub fn print_bill_detail_table(bill: &BillDetail) {
    println!("{}", Table::new(build_bill_detail_rows(bill)));
}

pub fn print_members_table(members: &[Member]) {
    println!("{}", Table::new(build_member_rows(members)));
}

pub fn print_amendments_table(amendments: &[Amendment]) {
    println!("{}", Table::new(build_amendment_rows(amendments)));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_action(action: Option<&LatestAction>) -> String {
    let Some(action) = action else {
        return String::new();
    };
    let text = truncate(action.text.as_deref().unwrap_or_default());
    match action.action_date {
        Some(date) => format!("{} {}", date, text),
        None => text,
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_CELL_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use congress_api::types::{AmendmentsPage, BillResponse, BillsPage, MembersPage};

    fn load_bills_fixture() -> Vec<Bill> {
        let json_str = include_str!("../../congress_api/tests/fixtures/bills.json");
        let page: BillsPage = serde_json::from_str(json_str).unwrap();
        page.bills
    }

    fn load_members_fixture() -> Vec<Member> {
        let json_str = include_str!("../../congress_api/tests/fixtures/members.json");
        let page: MembersPage = serde_json::from_str(json_str).unwrap();
        page.members
    }

    fn load_amendments_fixture() -> Vec<Amendment> {
        let json_str = include_str!("../../congress_api/tests/fixtures/amendments.json");
        let page: AmendmentsPage = serde_json::from_str(json_str).unwrap();
        page.amendments
    }

    // -- truncate tests --

    #[test]
    fn test_truncate_short_text() {
        assert_eq!(truncate("Postal Service Reform Act"), "Postal Service Reform Act");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "a".repeat(100);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_CELL_CHARS);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "é".repeat(100);
        assert!(truncate(&long).ends_with("..."));
    }

    // -- Row builder tests --

    #[test]
    fn test_build_bill_rows_mapping() {
        let bills = load_bills_fixture();
        let rows = build_bill_rows(&bills);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, "117-HR 3076");
        assert_eq!(row.title, "Postal Service Reform Act of 2022");
        assert_eq!(row.latest_action, "2022-04-06 Became Public Law No: 117-108.");
        assert_eq!(row.updated, "2022-09-29");
    }

    #[test]
    fn test_build_bill_rows_empty() {
        let rows = build_bill_rows(&[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_build_bill_detail_rows() {
        let json_str = include_str!("../../congress_api/tests/fixtures/bill_detail.json");
        let resp: BillResponse = serde_json::from_str(json_str).unwrap();
        let rows = build_bill_detail_rows(&resp.bill);

        let value = |field: &str| {
            rows.iter()
                .find(|r| r.field == field)
                .map(|r| r.value.clone())
                .unwrap()
        };
        assert_eq!(value("Bill"), "117-HR 3076");
        assert_eq!(value("Sponsors"), "Rep. Maloney, Carolyn B. [D-NY-12]");
        assert_eq!(value("Cosponsors"), "102");
        assert_eq!(value("Introduced"), "2021-05-11");
    }

    #[test]
    fn test_build_member_rows_mapping() {
        let members = load_members_fixture();
        let rows = build_member_rows(&members);

        assert_eq!(rows[0].bioguide_id, "L000174");
        assert_eq!(rows[0].party, "Democratic");
        assert_eq!(rows[0].district, "");
        assert_eq!(rows[1].state, "Pennsylvania");
        assert_eq!(rows[1].district, "5");
    }

    #[test]
    fn test_build_amendment_rows_prefers_purpose() {
        let amendments = load_amendments_fixture();
        let rows = build_amendment_rows(&amendments);
        assert_eq!(rows[0].id, "117-SAMDT 2137");
        assert_eq!(rows[0].purpose, "In the nature of a substitute.");
        assert!(rows[0].latest_action.starts_with("2021-08-08 Amendment SA 2137"));
    }

    #[test]
    fn test_bill_table_has_headers() {
        let table = Table::new(build_bill_rows(&load_bills_fixture())).to_string();
        assert!(table.contains("Latest Action"));
        assert!(table.contains("117-HR 3076"));
    }
}
