//! Paginated discovery of an account's liquidity positions.
//!
//! Pages are requested until the index returns an empty one. Nothing else
//! bounds the loop unless a page cap is configured: an index that never
//! returns an empty page keeps the cycle paging forever.

use alloy::primitives::Address;
use tracing::{debug, warn};

use crate::error::{HarvestError, HarvestResult};
use crate::source::PositionSource;
use crate::types::Position;

/// Fetches every position of an account, page by page
pub struct PositionFetcher<S> {
    source: S,
    page_size: u32,
    max_pages: Option<u32>,
}

impl<S: PositionSource> PositionFetcher<S> {
    /// Creates a new `PositionFetcher`
    ///
    /// # Arguments
    /// * `source` - Index to page through
    /// * `page_size` - Positions requested per page, must be positive
    /// * `max_pages` - Optional cap on pages per fetch
    pub fn new(source: S, page_size: u32, max_pages: Option<u32>) -> Self {
        Self {
            source,
            page_size,
            max_pages,
        }
    }

    /// Fetches all positions of `account`, largest liquidity balance first.
    ///
    /// Any failing or malformed page aborts the whole fetch; pages already
    /// read are discarded.
    pub async fn fetch_positions(&self, account: Address) -> HarvestResult<Vec<Position>> {
        let mut positions = Vec::new();
        let mut page: u32 = 0;

        loop {
            if self.max_pages.is_some_and(|max| page >= max) {
                warn!(
                    %account,
                    pages = page,
                    "page cap reached before the index ran out of positions"
                );
                break;
            }

            let skip = self
                .page_size
                .checked_mul(page)
                .ok_or_else(|| HarvestError::Fetch(format!("page offset overflow at page {page}")))?;
            let records = self
                .source
                .positions_page(account, self.page_size, skip)
                .await
                .map_err(|e| HarvestError::Fetch(format!("page {page}: {e:#}")))?;

            debug!(page, records = records.len(), "fetched positions page");
            if records.is_empty() {
                break;
            }

            for record in records {
                positions.push(Position::try_from(record)?);
            }
            page += 1;
        }

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{liquidity_position, MockSource};

    fn pages(sizes: &[usize]) -> Vec<Vec<clients_subgraph::LiquidityPosition>> {
        let mut n = 0u8;
        sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        n = n.wrapping_add(1);
                        liquidity_position(Address::repeat_byte(n), "1", "1", "100")
                    })
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn concatenates_pages_until_empty() {
        let source = MockSource::new(pages(&[20, 20, 7, 0]));
        let fetcher = PositionFetcher::new(source, 20, None);
        let account = Address::repeat_byte(0xab);

        let positions = fetcher.fetch_positions(account).await.unwrap();

        assert_eq!(positions.len(), 47);
        let requests = fetcher.source.requests();
        assert_eq!(
            requests,
            vec![(account, 20, 0), (account, 20, 20), (account, 20, 40), (account, 20, 60)]
        );
        assert_eq!(positions[0].pair_id, Address::repeat_byte(1));
        assert_eq!(positions[46].pair_id, Address::repeat_byte(47));
    }

    #[tokio::test]
    async fn empty_first_page_yields_nothing() {
        let fetcher = PositionFetcher::new(MockSource::new(vec![vec![]]), 20, None);
        let positions = fetcher.fetch_positions(Address::ZERO).await.unwrap();

        assert!(positions.is_empty());
        assert_eq!(fetcher.source.requests().len(), 1);
    }

    #[tokio::test]
    async fn failing_page_aborts_fetch() {
        let source = MockSource::new(pages(&[20, 20, 5])).failing_on_page(1);
        let fetcher = PositionFetcher::new(source, 20, None);

        let err = fetcher.fetch_positions(Address::ZERO).await.unwrap_err();

        assert!(matches!(err, HarvestError::Fetch(_)));
        assert_eq!(fetcher.source.requests().len(), 2);
    }

    #[tokio::test]
    async fn malformed_record_aborts_fetch() {
        let mut data = pages(&[3]);
        data[0][1].pair.total_supply = "not-a-number".to_string();
        let fetcher = PositionFetcher::new(MockSource::new(data), 20, None);

        let err = fetcher.fetch_positions(Address::ZERO).await.unwrap_err();
        assert!(matches!(err, HarvestError::Fetch(_)));
    }

    #[tokio::test]
    async fn page_cap_stops_paging() {
        let source = MockSource::new(pages(&[2, 2, 2, 2]));
        let fetcher = PositionFetcher::new(source, 2, Some(2));

        let positions = fetcher.fetch_positions(Address::ZERO).await.unwrap();

        assert_eq!(positions.len(), 4);
        assert_eq!(fetcher.source.requests().len(), 2);
    }
}
