//! The `members` subcommand.

use anyhow::{bail, Result};
use clap::Args;
use congress_api::types::Member;
use congress_api::{CancellationToken, CongressClient, MemberQuery, Query};
use futures::{StreamExt, TryStreamExt};

use super::page_limit;
use crate::output::{print_json, print_members_table, OutputFormat};

#[derive(Args)]
pub struct MembersArgs {
    /// Members who served in this congress
    #[arg(long)]
    pub congress: Option<u32>,

    /// Two-letter state code (e.g. CA, TX, NY)
    #[arg(long)]
    pub state: Option<String>,

    /// Congressional district (requires --state)
    #[arg(long)]
    pub district: Option<u32>,

    /// Only members currently serving
    #[arg(long)]
    pub current: bool,

    /// Results per request (1-250)
    #[arg(long, default_value = "20")]
    pub limit: i64,

    /// Maximum number of members to print
    #[arg(long, default_value = "20")]
    pub max: usize,
}

pub fn build_query(args: &MembersArgs) -> Result<MemberQuery> {
    let mut query = MemberQuery::default().with_limit(page_limit(args.limit, args.max)?);

    if let Some(congress) = args.congress {
        query = query.with_congress(congress);
    }
    if let Some(ref state) = args.state {
        let state = state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("invalid state code {:?}: expected two letters", state);
        }
        query = query.with_state(state);
    }
    if let Some(district) = args.district {
        query = query.with_district(district);
    }
    if args.current {
        query = query.with_current_member(true);
    }

    // Surface bad scoping combinations before any request goes out.
    query.path()?;
    Ok(query)
}

pub async fn run(
    args: &MembersArgs,
    client: &CongressClient,
    format: &OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let query = build_query(args)?;

    let members: Vec<Member> = client
        .members()
        .stream(&query, cancel.clone())?
        .take(args.max)
        .try_collect()
        .await?;

    eprintln!("{} members", members.len());

    match format {
        OutputFormat::Table => print_members_table(&members),
        OutputFormat::Json => print_json(&members),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> MembersArgs {
        MembersArgs {
            congress: None,
            state: None,
            district: None,
            current: false,
            limit: 20,
            max: 20,
        }
    }

    #[test]
    fn state_and_current_flags() {
        let query = build_query(&MembersArgs {
            state: Some("ca".to_string()),
            current: true,
            ..args()
        })
        .unwrap();
        assert_eq!(query.path().unwrap(), "member/CA");
        assert_eq!(query.to_params().get("currentMember"), Some("true"));
    }

    #[test]
    fn rejects_bad_state_and_scoping() {
        let bad_state = MembersArgs {
            state: Some("California".to_string()),
            ..args()
        };
        assert!(build_query(&bad_state).is_err());

        let district_only = MembersArgs {
            district: Some(12),
            ..args()
        };
        assert!(build_query(&district_only).is_err());
    }
}
