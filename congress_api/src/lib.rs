//! Typed client for the Congress.gov v3 API.
//!
//! Every request goes through a [`RequestExecutor`] that injects the API key,
//! forces JSON output, and retries rate-limited or failing requests with
//! exponential backoff. List endpoints can be consumed page by page or as a
//! lazily paginated [`Stream`](futures::Stream) of items.

mod client;
mod errors;
pub mod executor;
mod options;
pub mod pagination;
mod params;
mod query;
mod retry;
pub mod types;
mod user_agent;
pub use self::client::{AmendmentsClient, BillsClient, CongressClient, MembersClient};
pub use self::errors::Error;
pub use self::executor::{ApiRequest, RequestExecutor};
pub use self::options::{
    ClientOptions, ClientOptionsBuilder, RetryPolicy, DEFAULT_BASE_URL, MAX_LIMIT,
};
pub use self::pagination::{paginate_items, paginate_pages, PageCursor};
pub use self::params::QueryParams;
pub use self::query::{AmendmentQuery, BillQuery, MemberQuery, Query, QueryCommon, SortDirection};
pub use tokio_util::sync::CancellationToken;
