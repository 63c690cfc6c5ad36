//! Cursor-driven traversal of paginated list endpoints.

use std::future::Future;

use nsxt_client::model::ListResult;
use tracing::trace;

/// Fetch every page of a list endpoint and keep the accepted results.
///
/// `fetch` is called with `None` first, then with each returned cursor
/// until a page comes back without one. Results keep page order. The
/// first failing page aborts the walk and nothing is returned.
pub async fn walk_pages<T, E, F, Fut, K>(mut fetch: F, mut keep: K) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListResult<T>, E>>,
    K: FnMut(&T) -> bool,
{
    let mut results = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(cursor.take()).await?;
        pages += 1;

        let next = page.next_cursor().map(str::to_string);
        results.extend(page.results.into_iter().filter(|item| keep(item)));

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    trace!(pages, results = results.len(), "Walked paginated list");
    Ok(results)
}
