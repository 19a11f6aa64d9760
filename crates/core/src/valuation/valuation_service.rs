use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;

use super::valuation_calculator::compute_positions_and_cash;
use super::valuation_model::{Position, Valuation};
use super::valuation_traits::ValuationServiceTrait;
use crate::ledger::LedgerRepositoryTrait;
use crate::Result;

/// A cached replay result, stamped with the ledger head sequence it
/// was computed at. Valid only while the stamp matches the store.
struct CachedValuation {
    head: u64,
    valuation: Arc<Valuation>,
}

/// Service computing derived portfolio state by replaying the ledger.
///
/// Stateless with respect to the ledger: it never mutates the store.
/// Results are cached per portfolio; a cache entry is used only when
/// its head-sequence stamp still matches the store's, so a successful
/// append is never followed by a stale read, with or without an
/// explicit invalidation call.
pub struct ValuationService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    cache: DashMap<String, CachedValuation>,
}

impl ValuationService {
    pub fn new(ledger_repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self {
            ledger_repository,
            cache: DashMap::new(),
        }
    }
}

impl ValuationServiceTrait for ValuationService {
    fn get_valuation(&self, portfolio_id: &str) -> Result<Arc<Valuation>> {
        let head = self.ledger_repository.head_sequence(portfolio_id)?;

        if let Some(cached) = self.cache.get(portfolio_id) {
            if cached.head == head {
                return Ok(Arc::clone(&cached.valuation));
            }
        }

        let entries = self.ledger_repository.list_entries(portfolio_id)?;
        // Stamp with the highest sequence actually replayed, not the
        // last in replay order: a backdated record sorts early while
        // carrying the newest sequence. An append racing this read
        // only makes the stamp conservatively older.
        let replayed_head = entries.iter().map(|e| e.sequence()).max().unwrap_or(0);
        let valuation = Arc::new(compute_positions_and_cash(&entries)?);

        debug!(
            "Replayed {} ledger entries for portfolio {} (head {})",
            entries.len(),
            portfolio_id,
            replayed_head
        );

        self.cache.insert(
            portfolio_id.to_string(),
            CachedValuation {
                head: replayed_head,
                valuation: Arc::clone(&valuation),
            },
        );

        Ok(valuation)
    }

    fn get_holdings(&self, portfolio_id: &str) -> Result<Vec<Position>> {
        Ok(self.get_valuation(portfolio_id)?.open_positions())
    }

    fn get_cash_balance(&self, portfolio_id: &str) -> Result<Decimal> {
        Ok(self.get_valuation(portfolio_id)?.cash_balance)
    }

    fn invalidate(&self, portfolio_id: &str) {
        self.cache.remove(portfolio_id);
    }
}
