//! Offset-based auto-pagination.
//!
//! Turns a single-page fetch function into a lazily pulled stream. A page is
//! fetched only once the consumer has drained the previous one, so at most
//! one request is in flight per stream. The stream ends after the first page
//! holding fewer than `limit` items (including an empty page). When the total
//! is an exact multiple of `limit`, that means one trailing request that
//! comes back empty.

use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Position in an offset/limit result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    offset: i64,
    limit: i64,
    exhausted: bool,
}

impl PageCursor {
    /// Fails with [`Error::InvalidArgument`] unless `limit` is positive.
    /// Negative offsets are clamped to zero.
    pub fn new(start_offset: i64, limit: i64) -> Result<Self, Error> {
        if limit <= 0 {
            return Err(Error::InvalidArgument(format!(
                "page limit must be positive, got {limit}"
            )));
        }
        Ok(Self {
            offset: start_offset.max(0),
            limit,
            exhausted: false,
        })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Records a page of `count` items. A short page ends the sequence; a
    /// full one moves the offset forward by exactly `limit`.
    pub fn advance(&mut self, count: usize) {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        if count == 0 || count < self.limit {
            self.exhausted = true;
        } else {
            self.offset = self.offset.saturating_add(self.limit);
        }
    }
}

struct Pager<F, G> {
    cursor: PageCursor,
    fetch: F,
    select: G,
    cancel: CancellationToken,
}

impl<F, G> Pager<F, G> {
    async fn fetch_next<P, Fut>(&mut self) -> Result<P, Error>
    where
        F: FnMut(i64, i64, CancellationToken) -> Fut,
        Fut: Future<Output = Result<P, Error>>,
    {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let pending = (self.fetch)(self.cursor.offset, self.cursor.limit, self.cancel.clone());
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            page = pending => page,
        }
    }
}

async fn next_items<P, T, I, F, Fut, G>(
    mut pager: Pager<F, G>,
) -> Result<Option<(Vec<T>, Pager<F, G>)>, Error>
where
    F: FnMut(i64, i64, CancellationToken) -> Fut,
    Fut: Future<Output = Result<P, Error>>,
    G: FnMut(P) -> I,
    I: IntoIterator<Item = T>,
{
    if pager.cursor.is_exhausted() {
        return Ok(None);
    }
    let page = pager.fetch_next().await?;
    let items: Vec<T> = (pager.select)(page).into_iter().collect();
    pager.cursor.advance(items.len());
    Ok(Some((items, pager)))
}

async fn next_page<P, F, Fut, C>(mut pager: Pager<F, C>) -> Result<Option<(P, Pager<F, C>)>, Error>
where
    F: FnMut(i64, i64, CancellationToken) -> Fut,
    Fut: Future<Output = Result<P, Error>>,
    C: FnMut(&P) -> usize,
{
    if pager.cursor.is_exhausted() {
        return Ok(None);
    }
    let page = pager.fetch_next().await?;
    let count = (pager.select)(&page);
    pager.cursor.advance(count);
    Ok(Some((page, pager)))
}

/// Streams every item across pages, in upstream order.
///
/// `fetch_page(offset, limit, cancel)` loads one page; `project_items` pulls
/// its items out (`Option<Vec<_>>` works, `None` counting as empty). Errors
/// and cancellation are yielded once, after which the stream ends. A
/// non-positive `limit` is rejected before anything is fetched.
pub fn paginate_items<P, T, I, F, Fut, G>(
    fetch_page: F,
    project_items: G,
    start_offset: i64,
    limit: i64,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<T, Error>>, Error>
where
    F: FnMut(i64, i64, CancellationToken) -> Fut,
    Fut: Future<Output = Result<P, Error>>,
    G: FnMut(P) -> I,
    I: IntoIterator<Item = T>,
{
    let pager = Pager {
        cursor: PageCursor::new(start_offset, limit)?,
        fetch: fetch_page,
        select: project_items,
        cancel,
    };
    let pages = stream::try_unfold(pager, next_items::<P, T, I, F, Fut, G>);
    Ok(pages
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, Error>)))
        .try_flatten())
}

/// Streams whole pages. `count_items` decides termination the same way
/// [`paginate_items`] does; the short page that ends the stream is yielded.
pub fn paginate_pages<P, F, Fut, C>(
    fetch_page: F,
    count_items: C,
    start_offset: i64,
    limit: i64,
    cancel: CancellationToken,
) -> Result<impl Stream<Item = Result<P, Error>>, Error>
where
    F: FnMut(i64, i64, CancellationToken) -> Fut,
    Fut: Future<Output = Result<P, Error>>,
    C: FnMut(&P) -> usize,
{
    let pager = Pager {
        cursor: PageCursor::new(start_offset, limit)?,
        fetch: fetch_page,
        select: count_items,
        cancel,
    };
    Ok(stream::try_unfold(pager, next_page::<P, F, Fut, C>))
}
