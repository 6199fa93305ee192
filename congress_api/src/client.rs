//! HTTP client for the Congress.gov v3 API.

use std::sync::Arc;

use futures::Stream;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::{
    executor::RequestExecutor,
    pagination::paginate_items,
    query::{AmendmentQuery, BillQuery, MemberQuery, Query},
    types::{
        Amendment, AmendmentsPage, Bill, BillDetail, BillResponse, BillType, BillsPage, KnownFields,
        Member, MemberDetail, MemberResponse, MembersPage,
    },
    ClientOptions, Error,
};

/// Entry point for the Congress.gov API.
///
/// Cheap to clone: clones share one executor, one connection pool, and one
/// set of options. Resource endpoints live on the sub-clients returned by
/// [`bills`](Self::bills), [`members`](Self::members) and
/// [`amendments`](Self::amendments).
#[derive(Clone)]
pub struct CongressClient {
    executor: Arc<RequestExecutor>,
}

impl CongressClient {
    /// Creates a client pointing at the production API with default options.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_options(api_key, ClientOptions::default())
    }

    pub fn with_options(api_key: impl Into<String>, options: ClientOptions) -> Result<Self, Error> {
        let executor = RequestExecutor::new(api_key, Arc::new(options))?;
        Ok(Self {
            executor: Arc::new(executor),
        })
    }

    /// Creates a client with a custom base URL and otherwise default
    /// options. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Result<Self, Error> {
        let options = ClientOptions::builder().base_url(base_url).build()?;
        Self::with_options(api_key, options)
    }

    /// Uses a caller-configured `reqwest::Client` as the transport.
    pub fn with_http_client(
        http: reqwest::Client,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        Self {
            executor: Arc::new(RequestExecutor::with_http_client(
                http,
                api_key,
                Arc::new(options),
            )),
        }
    }

    /// The shared executor, for endpoints without a typed wrapper.
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }

    pub fn options(&self) -> &ClientOptions {
        self.executor.options()
    }

    pub fn bills(&self) -> BillsClient<'_> {
        BillsClient { client: self }
    }

    pub fn members(&self) -> MembersClient<'_> {
        MembersClient { client: self }
    }

    pub fn amendments(&self) -> AmendmentsClient<'_> {
        AmendmentsClient { client: self }
    }

    async fn list<Q, P>(&self, query: &Q, cancel: &CancellationToken) -> Result<P, Error>
    where
        Q: Query,
        P: DeserializeOwned + KnownFields,
    {
        let path = query.path()?;
        self.executor
            .get_json::<P>(&path, &query.to_params(), cancel)
            .await
    }

    /// Streams every item matching `query`, starting at its offset and paging
    /// by its limit (or the client's default limit).
    fn stream<Q, P, T>(
        &self,
        query: &Q,
        project: fn(P) -> Vec<T>,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<T, Error>>, Error>
    where
        Q: Query,
        P: DeserializeOwned + KnownFields,
    {
        let path = query.path()?;
        let filters = query.filter_params();
        let limit = query
            .common()
            .limit
            .unwrap_or_else(|| self.options().default_limit());
        let executor = Arc::clone(&self.executor);

        paginate_items(
            move |page_offset, page_limit, page_cancel| {
                let executor = Arc::clone(&executor);
                let path = path.clone();
                let mut params = filters.clone();
                params.set("offset", Some(page_offset.to_string()));
                params.set("limit", Some(page_limit.to_string()));
                async move { executor.get_json::<P>(&path, &params, &page_cancel).await }
            },
            project,
            query.common().offset,
            limit,
            cancel,
        )
    }
}

/// Bill endpoints.
pub struct BillsClient<'a> {
    client: &'a CongressClient,
}

impl BillsClient<'_> {
    /// Fetches one page of bills matching the given query.
    pub async fn list(
        &self,
        query: &BillQuery,
        cancel: &CancellationToken,
    ) -> Result<BillsPage, Error> {
        self.client.list(query, cancel).await
    }

    /// Fetches a single bill, e.g. `(118, BillType::Hr, 3076)`.
    pub async fn get(
        &self,
        congress: u32,
        bill_type: BillType,
        number: u32,
        cancel: &CancellationToken,
    ) -> Result<BillDetail, Error> {
        let path = format!("bill/{congress}/{bill_type}/{number}");
        let resp: BillResponse = self
            .client
            .executor
            .get_json(&path, &Default::default(), cancel)
            .await?;
        Ok(resp.bill)
    }

    /// Streams all bills matching the query across pages.
    pub fn stream(
        &self,
        query: &BillQuery,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<Bill, Error>>, Error> {
        self.client
            .stream::<_, BillsPage, Bill>(query, |page| page.bills, cancel)
    }
}

/// Member endpoints.
pub struct MembersClient<'a> {
    client: &'a CongressClient,
}

impl MembersClient<'_> {
    /// Fetches one page of members matching the given query.
    pub async fn list(
        &self,
        query: &MemberQuery,
        cancel: &CancellationToken,
    ) -> Result<MembersPage, Error> {
        self.client.list(query, cancel).await
    }

    /// Fetches a single member by bioguide ID.
    pub async fn get(
        &self,
        bioguide_id: &str,
        cancel: &CancellationToken,
    ) -> Result<MemberDetail, Error> {
        if bioguide_id.trim().is_empty() || bioguide_id.contains('/') {
            return Err(Error::InvalidArgument(format!(
                "invalid bioguide id {bioguide_id:?}"
            )));
        }
        let path = format!("member/{}", bioguide_id.trim());
        let resp: MemberResponse = self
            .client
            .executor
            .get_json(&path, &Default::default(), cancel)
            .await?;
        Ok(resp.member)
    }

    /// Streams all members matching the query across pages.
    pub fn stream(
        &self,
        query: &MemberQuery,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<Member, Error>>, Error> {
        self.client
            .stream::<_, MembersPage, Member>(query, |page| page.members, cancel)
    }
}

/// Amendment endpoints.
pub struct AmendmentsClient<'a> {
    client: &'a CongressClient,
}

impl AmendmentsClient<'_> {
    /// Fetches one page of amendments matching the given query.
    pub async fn list(
        &self,
        query: &AmendmentQuery,
        cancel: &CancellationToken,
    ) -> Result<AmendmentsPage, Error> {
        self.client.list(query, cancel).await
    }

    /// Streams all amendments matching the query across pages.
    pub fn stream(
        &self,
        query: &AmendmentQuery,
        cancel: CancellationToken,
    ) -> Result<impl Stream<Item = Result<Amendment, Error>>, Error> {
        self.client
            .stream::<_, AmendmentsPage, Amendment>(query, |page| page.amendments, cancel)
    }
}
