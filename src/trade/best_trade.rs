//! Depth-first search for the best trades across a set of pools.

use super::{sorted_insert, trade_comparator, Trade, TradeType};
use crate::currency::Currency;
use crate::error::{Error, TradeError};
use crate::fractions::CurrencyAmount;
use crate::pool::AmmPool;
use crate::route::Route;
use crate::tick::TickDataProvider;
use futures::future::{FutureExt, LocalBoxFuture};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// How many trades to return at most.
    pub max_num_results: usize,
    /// How many pools a single route may go through.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

impl BestTradeOptions {
    fn validate<P>(&self, pools: &[AmmPool<P>]) -> Result<(), Error> {
        if pools.is_empty() {
            return Err(TradeError::NoPools.into());
        }
        if self.max_hops == 0 {
            return Err(TradeError::MaxHops.into());
        }
        if self.max_num_results == 0 {
            return Err(TradeError::MaxNumResults.into());
        }
        Ok(())
    }
}

struct Search<'a, P> {
    pools: &'a [AmmPool<P>],
    /// The fixed side of the trade.
    amount: &'a CurrencyAmount,
    /// The currency at the far end of the route.
    target: &'a Currency,
    max_num_results: usize,
}

/// Single-route trades from `currency_amount_in` to `currency_out`, best
/// first, using each pool at most once per route.
///
/// Pools whose quote prunes are skipped; every other error aborts the search.
pub async fn best_trade_exact_in<P: TickDataProvider + Clone>(
    pools: &[AmmPool<P>],
    currency_amount_in: &CurrencyAmount,
    currency_out: &Currency,
    options: BestTradeOptions,
) -> Result<Vec<Trade<P>>, Error> {
    options.validate(pools)?;
    let search = Search {
        pools,
        amount: currency_amount_in,
        target: currency_out,
        max_num_results: options.max_num_results,
    };
    let trades = exact_in_step(
        &search,
        currency_amount_in.clone(),
        options.max_hops,
        Vec::new(),
        vec![false; pools.len()],
        Vec::new(),
    )
    .await?;
    debug!(
        pools = pools.len(),
        trades = trades.len(),
        "exact input search finished"
    );
    Ok(trades)
}

/// Like [`best_trade_exact_in`], walking backwards from `currency_amount_out`.
pub async fn best_trade_exact_out<P: TickDataProvider + Clone>(
    pools: &[AmmPool<P>],
    currency_in: &Currency,
    currency_amount_out: &CurrencyAmount,
    options: BestTradeOptions,
) -> Result<Vec<Trade<P>>, Error> {
    options.validate(pools)?;
    let search = Search {
        pools,
        amount: currency_amount_out,
        target: currency_in,
        max_num_results: options.max_num_results,
    };
    let trades = exact_out_step(
        &search,
        currency_amount_out.clone(),
        options.max_hops,
        Vec::new(),
        vec![false; pools.len()],
        Vec::new(),
    )
    .await?;
    debug!(
        pools = pools.len(),
        trades = trades.len(),
        "exact output search finished"
    );
    Ok(trades)
}

fn quotable<P>(pool: &AmmPool<P>) -> bool {
    if !pool.supports_quoting() {
        debug!(pool = %pool.pool_key(), "skipping pool whose hooks alter swaps");
        return false;
    }
    true
}

fn exact_in_step<'a, P: TickDataProvider + Clone + 'a>(
    search: &'a Search<'a, P>,
    amount_in: CurrencyAmount,
    hops_left: usize,
    current_pools: Vec<AmmPool<P>>,
    used: Vec<bool>,
    mut best: Vec<Trade<P>>,
) -> LocalBoxFuture<'a, Result<Vec<Trade<P>>, Error>> {
    async move {
        let unused = used.iter().filter(|used| !**used).count();
        for (i, pool) in search.pools.iter().enumerate() {
            if used[i] || !pool.involves(amount_in.currency()) || !quotable(pool) {
                continue;
            }
            let amount_out = match pool.get_output_amount(&amount_in, None).await? {
                Ok((amount_out, _)) => amount_out,
                Err(reason) => {
                    debug!(pool = %pool.pool_key(), %reason, "pool pruned from search");
                    continue;
                }
            };

            let mut pools = current_pools.clone();
            pools.push(pool.clone());
            if amount_out.currency().wrapped() == search.target.wrapped() {
                let route = Route::new(pools, search.amount.currency().clone(), search.target.clone())?;
                let trade = Trade::create_unchecked_trade(
                    route,
                    search.amount.clone(),
                    amount_out,
                    TradeType::ExactInput,
                )?;
                sorted_insert(&mut best, trade, search.max_num_results, trade_comparator)?;
            } else if hops_left > 1 && unused > 1 {
                let mut used = used.clone();
                used[i] = true;
                best = exact_in_step(search, amount_out, hops_left - 1, pools, used, best).await?;
            }
        }
        Ok(best)
    }
    .boxed_local()
}

fn exact_out_step<'a, P: TickDataProvider + Clone + 'a>(
    search: &'a Search<'a, P>,
    amount_out: CurrencyAmount,
    hops_left: usize,
    current_pools: Vec<AmmPool<P>>,
    used: Vec<bool>,
    mut best: Vec<Trade<P>>,
) -> LocalBoxFuture<'a, Result<Vec<Trade<P>>, Error>> {
    async move {
        let unused = used.iter().filter(|used| !**used).count();
        for (i, pool) in search.pools.iter().enumerate() {
            if used[i] || !pool.involves(amount_out.currency()) || !quotable(pool) {
                continue;
            }
            let amount_in = match pool.get_input_amount(&amount_out, None).await? {
                Ok((amount_in, _)) => amount_in,
                Err(reason) => {
                    debug!(pool = %pool.pool_key(), %reason, "pool pruned from search");
                    continue;
                }
            };

            let mut pools = Vec::with_capacity(current_pools.len() + 1);
            pools.push(pool.clone());
            pools.extend(current_pools.iter().cloned());
            if amount_in.currency().wrapped() == search.target.wrapped() {
                let route = Route::new(pools, search.target.clone(), search.amount.currency().clone())?;
                let trade = Trade::create_unchecked_trade(
                    route,
                    amount_in,
                    search.amount.clone(),
                    TradeType::ExactOutput,
                )?;
                sorted_insert(&mut best, trade, search.max_num_results, trade_comparator)?;
            } else if hops_left > 1 && unused > 1 {
                let mut used = used.clone();
                used[i] = true;
                best = exact_out_step(search, amount_in, hops_left - 1, pools, used, best).await?;
            }
        }
        Ok(best)
    }
    .boxed_local()
}
