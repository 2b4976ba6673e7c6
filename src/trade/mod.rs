//! Trades over one or more routes and the search for the best ones.

mod best_trade;
mod sorted_insert;

pub use best_trade::{best_trade_exact_in, best_trade_exact_out, BestTradeOptions};
pub use sorted_insert::sorted_insert;

use crate::currency::Currency;
use crate::error::{Error, Quote, TradeError};
use crate::fractions::{CurrencyAmount, Fraction, Percent, Price};
use crate::route::Route;
use crate::tick::{NoTickDataProvider, TickDataProvider};
use crate::FastSet;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// One route of a trade with the amounts it moves.
#[derive(Clone, Debug)]
pub struct Swap<P = NoTickDataProvider> {
    pub route: Route<P>,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

/// Relative shortfall of `output_amount` against what `mid_price` promises
/// for `input_amount`.
pub fn compute_price_impact(
    mid_price: &Price,
    input_amount: &CurrencyAmount,
    output_amount: &CurrencyAmount,
) -> Result<Percent, Error> {
    let quoted = mid_price.quote(input_amount)?;
    let impact = quoted
        .as_fraction()
        .subtract(output_amount.as_fraction())
        .divide(quoted.as_fraction())?;
    Ok(Percent::from(impact))
}

/// Orders trades best first: more output, then less input, then fewer
/// currencies visited.
///
/// Both trades must share input and output currencies.
pub fn trade_comparator<P>(a: &Trade<P>, b: &Trade<P>) -> Ordering {
    if a.output_amount.equal_to(&b.output_amount) {
        if a.input_amount.equal_to(&b.input_amount) {
            let hops = |trade: &Trade<P>| -> usize {
                trade.swaps.iter().map(|swap| swap.route.path().len()).sum()
            };
            return hops(a).cmp(&hops(b));
        }
        if a.input_amount.less_than(&b.input_amount) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if a.output_amount.less_than(&b.output_amount) {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

#[derive(Clone, Debug)]
pub struct Trade<P = NoTickDataProvider> {
    swaps: Vec<Swap<P>>,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    execution_price: Price,
    price_impact: Percent,
}

impl<P> Trade<P> {
    /// A trade from amounts the caller already quoted.
    pub fn create_unchecked_trade(
        route: Route<P>,
        input_amount: CurrencyAmount,
        output_amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        Self::create_unchecked_trade_with_multiple_routes(
            vec![Swap {
                route,
                input_amount,
                output_amount,
            }],
            trade_type,
        )
    }

    /// Every route must start and end at the same (wrapped) currencies and no
    /// pool may appear twice across routes.
    pub fn create_unchecked_trade_with_multiple_routes(
        swaps: Vec<Swap<P>>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let first = swaps.first().ok_or(TradeError::NoRoutes)?;
        let input_currency = first.route.input().clone();
        let output_currency = first.route.output().clone();

        let mut total_pools = 0;
        let mut pool_keys = FastSet::default();
        for swap in &swaps {
            if swap.route.input().wrapped() != input_currency.wrapped()
                || swap.input_amount.currency().wrapped() != input_currency.wrapped()
            {
                return Err(TradeError::InputCurrencyMismatch.into());
            }
            if swap.route.output().wrapped() != output_currency.wrapped()
                || swap.output_amount.currency().wrapped() != output_currency.wrapped()
            {
                return Err(TradeError::OutputCurrencyMismatch.into());
            }
            total_pools += swap.route.pools().len();
            pool_keys.extend(swap.route.pools().iter().map(|pool| pool.pool_key()));
        }
        if pool_keys.len() != total_pools {
            return Err(TradeError::PoolsDuplicated.into());
        }

        let swaps: Vec<Swap<P>> = swaps
            .into_iter()
            .map(|swap| Swap {
                input_amount: swap.input_amount.with_currency(swap.route.input().clone()),
                output_amount: swap.output_amount.with_currency(swap.route.output().clone()),
                route: swap.route,
            })
            .collect();

        let mut input_amount = CurrencyAmount::from_raw_amount(input_currency.clone(), 0)?;
        let mut output_amount = CurrencyAmount::from_raw_amount(output_currency.clone(), 0)?;
        let mut spot_output = Fraction::from_integer(0);
        for swap in &swaps {
            input_amount = input_amount.add(&swap.input_amount.with_currency(input_currency.clone()))?;
            output_amount =
                output_amount.add(&swap.output_amount.with_currency(output_currency.clone()))?;
            spot_output = spot_output.add(swap.route.mid_price().quote(&swap.input_amount)?.as_fraction());
        }

        let execution_price = Price::new(
            input_currency.clone(),
            output_currency.clone(),
            input_amount.quotient(),
            output_amount.quotient(),
        )?;
        let price_impact = Percent::from(
            spot_output
                .subtract(output_amount.as_fraction())
                .divide(&spot_output)?,
        );

        Ok(Self {
            swaps,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            price_impact,
        })
    }

    pub fn swaps(&self) -> &[Swap<P>] {
        &self.swaps
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<P>> {
        self.swaps.iter().map(|swap| &swap.route)
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn input_currency(&self) -> &Currency {
        self.input_amount.currency()
    }

    pub fn output_currency(&self) -> &Currency {
        self.output_amount.currency()
    }

    /// Total input across all routes.
    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    /// Total output across all routes.
    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    pub fn execution_price(&self) -> &Price {
        &self.execution_price
    }

    /// How far the quoted output falls short of the routes' mid prices.
    pub fn price_impact(&self) -> &Percent {
        &self.price_impact
    }

    /// Least output accepted for `slippage_tolerance`.
    pub fn minimum_amount_out(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount, Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::SlippageTolerance.into());
        }
        if self.trade_type == TradeType::ExactOutput {
            return Ok(self.output_amount.clone());
        }
        let amount_out = Fraction::from_integer(1)
            .add(slippage_tolerance.as_fraction())
            .invert()?
            .multiply(&Fraction::from_integer(self.output_amount.quotient()))
            .quotient();
        CurrencyAmount::from_raw_amount(self.output_amount.currency().clone(), amount_out)
    }

    /// Most input paid for `slippage_tolerance`.
    pub fn maximum_amount_in(&self, slippage_tolerance: &Percent) -> Result<CurrencyAmount, Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::SlippageTolerance.into());
        }
        if self.trade_type == TradeType::ExactInput {
            return Ok(self.input_amount.clone());
        }
        let amount_in = Fraction::from_integer(1)
            .add(slippage_tolerance.as_fraction())
            .multiply(&Fraction::from_integer(self.input_amount.quotient()))
            .quotient();
        CurrencyAmount::from_raw_amount(self.input_amount.currency().clone(), amount_in)
    }

    /// Execution price at the slippage-adjusted amounts.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> Result<Price, Error> {
        Price::new(
            self.input_amount.currency().clone(),
            self.output_amount.currency().clone(),
            self.maximum_amount_in(slippage_tolerance)?.quotient(),
            self.minimum_amount_out(slippage_tolerance)?.quotient(),
        )
    }
}

impl<P: TickDataProvider + Clone> Trade<P> {
    /// Quotes `amount` through every pool of `route`, in order for exact
    /// input and backwards for exact output.
    pub async fn from_route(
        route: Route<P>,
        amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Quote<Self>, Error> {
        let swap = match Self::quote_route(route, amount, trade_type).await? {
            Ok(swap) => swap,
            Err(reason) => return Ok(Err(reason)),
        };
        Ok(Ok(Self::create_unchecked_trade_with_multiple_routes(
            vec![swap],
            trade_type,
        )?))
    }

    /// Like [`Trade::from_route`] for a split across several routes.
    pub async fn from_routes(
        routes: Vec<(CurrencyAmount, Route<P>)>,
        trade_type: TradeType,
    ) -> Result<Quote<Self>, Error> {
        let mut swaps = Vec::with_capacity(routes.len());
        for (amount, route) in routes {
            match Self::quote_route(route, amount, trade_type).await? {
                Ok(swap) => swaps.push(swap),
                Err(reason) => return Ok(Err(reason)),
            }
        }
        Ok(Ok(Self::create_unchecked_trade_with_multiple_routes(
            swaps, trade_type,
        )?))
    }

    pub async fn exact_in(route: Route<P>, amount_in: CurrencyAmount) -> Result<Quote<Self>, Error> {
        Self::from_route(route, amount_in, TradeType::ExactInput).await
    }

    pub async fn exact_out(route: Route<P>, amount_out: CurrencyAmount) -> Result<Quote<Self>, Error> {
        Self::from_route(route, amount_out, TradeType::ExactOutput).await
    }

    async fn quote_route(
        route: Route<P>,
        amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Quote<Swap<P>>, Error> {
        match trade_type {
            TradeType::ExactInput => {
                if !amount.currency().equivalent(route.input()) {
                    return Err(TradeError::InputCurrencyMismatch.into());
                }
                let mut current = amount.clone();
                for pool in route.pools() {
                    match pool.get_output_amount(&current, None).await? {
                        Ok((output, _)) => current = output,
                        Err(reason) => return Ok(Err(reason)),
                    }
                }
                Ok(Ok(Swap {
                    input_amount: amount.with_currency(route.input().clone()),
                    output_amount: current.with_currency(route.output().clone()),
                    route,
                }))
            }
            TradeType::ExactOutput => {
                if !amount.currency().equivalent(route.output()) {
                    return Err(TradeError::OutputCurrencyMismatch.into());
                }
                let mut current = amount.clone();
                for pool in route.pools().iter().rev() {
                    match pool.get_input_amount(&current, None).await? {
                        Ok((input, _)) => current = input,
                        Err(reason) => return Ok(Err(reason)),
                    }
                }
                Ok(Ok(Swap {
                    input_amount: current.with_currency(route.input().clone()),
                    output_amount: amount.with_currency(route.output().clone()),
                    route,
                }))
            }
        }
    }
}
