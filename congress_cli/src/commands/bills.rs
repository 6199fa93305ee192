//! The `bills` and `bill` subcommands.

use anyhow::{anyhow, Result};
use clap::Args;
use congress_api::types::{Bill, BillType};
use congress_api::{BillQuery, CancellationToken, CongressClient, Query, SortDirection};
use futures::{StreamExt, TryStreamExt};

use super::{page_limit, parse_date_bound};
use crate::output::{print_bill_detail_table, print_bills_table, print_json, OutputFormat};

#[derive(Args)]
pub struct BillsArgs {
    /// Congress number, e.g. 118
    #[arg(long)]
    pub congress: Option<u32>,

    /// Bill type: hr, s, hjres, sjres, hconres, sconres, hres, sres (requires --congress)
    #[arg(long = "type")]
    pub bill_type: Option<String>,

    /// Only bills updated on/after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Only bills updated on/before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort by update date: asc or desc
    #[arg(long)]
    pub sort: Option<String>,

    /// Results per request (1-250)
    #[arg(long, default_value = "20")]
    pub limit: i64,

    /// Maximum number of bills to print
    #[arg(long, default_value = "20")]
    pub max: usize,
}

#[derive(Args)]
pub struct BillArgs {
    /// Congress number, e.g. 117
    pub congress: u32,

    /// Bill type, e.g. hr
    pub bill_type: String,

    /// Bill number, e.g. 3076
    pub number: u32,
}

/// Builds the list query from command-line flags.
pub fn build_query(args: &BillsArgs) -> Result<BillQuery> {
    let mut query = BillQuery::default().with_limit(page_limit(args.limit, args.max)?);

    if let Some(congress) = args.congress {
        query = query.with_congress(congress);
    }
    if let Some(ref bill_type) = args.bill_type {
        query = query.with_bill_type(parse_bill_type(bill_type)?);
    }
    if let Some(ref from) = args.from {
        query = query.with_from_date_time(parse_date_bound(from, false)?);
    }
    if let Some(ref to) = args.to {
        query = query.with_to_date_time(parse_date_bound(to, true)?);
    }
    if let Some(ref sort) = args.sort {
        let direction: SortDirection = sort.parse().map_err(|e: String| anyhow!(e))?;
        query = query.with_sort(direction);
    }
    Ok(query)
}

fn parse_bill_type(value: &str) -> Result<BillType> {
    value.parse().map_err(|e: String| anyhow!(e))
}

pub async fn run(
    args: &BillsArgs,
    client: &CongressClient,
    format: &OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let query = build_query(args)?;

    let bills: Vec<Bill> = client
        .bills()
        .stream(&query, cancel.clone())?
        .take(args.max)
        .try_collect()
        .await?;

    eprintln!("{} bills", bills.len());

    match format {
        OutputFormat::Table => print_bills_table(&bills),
        OutputFormat::Json => print_json(&bills),
    }

    Ok(())
}

pub async fn show(
    args: &BillArgs,
    client: &CongressClient,
    format: &OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let bill_type = parse_bill_type(&args.bill_type)?;
    let bill = client
        .bills()
        .get(args.congress, bill_type, args.number, cancel)
        .await?;

    match format {
        OutputFormat::Table => print_bill_detail_table(&bill),
        OutputFormat::Json => print_json(&bill),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BillsArgs {
        BillsArgs {
            congress: None,
            bill_type: None,
            from: None,
            to: None,
            sort: None,
            limit: 250,
            max: 20,
        }
    }

    #[test]
    fn query_from_flags() {
        let query = build_query(&BillsArgs {
            congress: Some(118),
            bill_type: Some("HR".to_string()),
            from: Some("2024-01-01".to_string()),
            sort: Some("asc".to_string()),
            ..args()
        })
        .unwrap();

        assert_eq!(query.path().unwrap(), "bill/118/hr");
        let params = query.to_params();
        assert_eq!(params.get("limit"), Some("20"));
        assert_eq!(params.get("fromDateTime"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(params.get("sort"), Some("updateDate asc"));
    }

    #[test]
    fn rejects_unknown_type_and_sort() {
        let bad_type = BillsArgs {
            congress: Some(118),
            bill_type: Some("xyz".to_string()),
            ..args()
        };
        assert!(build_query(&bad_type).is_err());

        let bad_sort = BillsArgs {
            sort: Some("up".to_string()),
            ..args()
        };
        assert!(build_query(&bad_sort).is_err());
    }
}
