use chrono::{FixedOffset, TimeZone, Utc};
use congress_api::types::BillType;
use congress_api::{AmendmentQuery, BillQuery, Error, MemberQuery, Query, SortDirection};

#[test]
fn bill_query_paths() {
    assert_eq!(BillQuery::default().path().unwrap(), "bill");
    assert_eq!(
        BillQuery::default().with_congress(118).path().unwrap(),
        "bill/118"
    );
    assert_eq!(
        BillQuery::default()
            .with_congress(118)
            .with_bill_type(BillType::HJRes)
            .path()
            .unwrap(),
        "bill/118/hjres"
    );
}

#[test]
fn bill_type_without_congress_is_rejected() {
    let query = BillQuery::default().with_bill_type(BillType::Hr);
    assert!(matches!(query.path(), Err(Error::InvalidArgument(_))));
}

#[test]
fn default_params_only_carry_offset() {
    let params = BillQuery::default().to_params();
    let pairs: Vec<_> = params.iter().collect();
    assert_eq!(pairs, [("offset", "0")]);
}

#[test]
fn page_params_and_filters() {
    let query = BillQuery::default()
        .with_offset(500)
        .with_limit(250)
        .with_sort(SortDirection::Desc);
    let params = query.to_params();
    assert_eq!(params.get("offset"), Some("500"));
    assert_eq!(params.get("limit"), Some("250"));
    assert_eq!(params.get("sort"), Some("updateDate desc"));

    let filters = query.filter_params();
    assert_eq!(filters.get("offset"), None);
    assert_eq!(filters.get("sort"), Some("updateDate desc"));
}

#[test]
fn negative_offset_is_sent_as_zero() {
    let params = BillQuery::default().with_offset(-10).to_params();
    assert_eq!(params.get("offset"), Some("0"));
}

#[test]
fn date_window_is_normalized_to_utc() {
    let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    let from = eastern.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
    let params = AmendmentQuery::default()
        .with_from_date_time(from)
        .with_to_date_time(to)
        .to_params();
    assert_eq!(params.get("fromDateTime"), Some("2024-03-02T01:30:00Z"));
    assert_eq!(params.get("toDateTime"), Some("2024-03-31T23:59:59Z"));
}

#[test]
fn sort_direction_parses() {
    assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
    assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    assert!("sideways".parse::<SortDirection>().is_err());
    assert_eq!(SortDirection::default(), SortDirection::Desc);
}

#[test]
fn member_query_paths() {
    assert_eq!(MemberQuery::default().path().unwrap(), "member");
    assert_eq!(
        MemberQuery::default().with_congress(118).path().unwrap(),
        "member/congress/118"
    );
    assert_eq!(
        MemberQuery::default().with_state(" mi ").path().unwrap(),
        "member/MI"
    );
    assert_eq!(
        MemberQuery::default()
            .with_state("MI")
            .with_district(10)
            .path()
            .unwrap(),
        "member/MI/10"
    );
    assert_eq!(
        MemberQuery::default()
            .with_congress(118)
            .with_state("mi")
            .with_district(10)
            .path()
            .unwrap(),
        "member/congress/118/MI/10"
    );
}

#[test]
fn member_query_rejects_incomplete_scoping() {
    let congress_and_state = MemberQuery::default().with_congress(118).with_state("MI");
    assert!(matches!(
        congress_and_state.path(),
        Err(Error::InvalidArgument(_))
    ));

    let district_only = MemberQuery::default().with_district(3);
    assert!(matches!(district_only.path(), Err(Error::InvalidArgument(_))));
}

#[test]
fn member_query_current_member_param() {
    let params = MemberQuery::default().with_current_member(false).to_params();
    assert_eq!(params.get("currentMember"), Some("false"));
    assert_eq!(MemberQuery::default().to_params().get("currentMember"), None);
}

#[test]
fn amendment_query_paths() {
    assert_eq!(AmendmentQuery::default().path().unwrap(), "amendment");
    assert_eq!(
        AmendmentQuery::default().with_congress(117).path().unwrap(),
        "amendment/117"
    );
}

#[test]
fn bill_type_parsing() {
    for kind in BillType::ALL {
        assert_eq!(kind.as_path().parse::<BillType>(), Ok(kind));
        assert_eq!(kind.as_path().to_uppercase().parse::<BillType>(), Ok(kind));
    }
    assert!("hamdt".parse::<BillType>().is_err());
    assert_eq!(BillType::SConRes.to_string(), "sconres");
}
