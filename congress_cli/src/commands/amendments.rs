use anyhow::Result;
use clap::Args;
use congress_api::types::Amendment;
use congress_api::{AmendmentQuery, CancellationToken, CongressClient, Query};
use futures::{StreamExt, TryStreamExt};

use super::page_limit;
use crate::output::{print_amendments_table, print_json, OutputFormat};

#[derive(Args)]
pub struct AmendmentsArgs {
    /// Congress number, e.g. 117
    #[arg(long)]
    pub congress: Option<u32>,

    /// Results per request (1-250)
    #[arg(long, default_value = "20")]
    pub limit: i64,

    /// Maximum number of amendments to print
    #[arg(long, default_value = "20")]
    pub max: usize,
}

pub async fn run(
    args: &AmendmentsArgs,
    client: &CongressClient,
    format: &OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut query = AmendmentQuery::default().with_limit(page_limit(args.limit, args.max)?);
    if let Some(congress) = args.congress {
        query = query.with_congress(congress);
    }

    let amendments: Vec<Amendment> = client
        .amendments()
        .stream(&query, cancel.clone())?
        .take(args.max)
        .try_collect()
        .await?;

    eprintln!("{} amendments", amendments.len());

    match format {
        OutputFormat::Table => print_amendments_table(&amendments),
        OutputFormat::Json => print_json(&amendments),
    }

    Ok(())
}
