use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
    #[error("Math error - negative value where unsigned expected")]
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - sqrtRatio is 0")]
    SqrtRatioIsZero,
    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - liquidity is 0")]
    LiquidityIsZero,
    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
    #[error("State error - sqrtPrice {sqrt_price} is not within tick {tick}")]
    PriceBounds { sqrt_price: String, tick: i32 },
    #[error("State error - fee {0} must be below 1_000_000")]
    Fee(u32),
    #[error("State error - invalid tick spacing")]
    TickSpacing,
    #[error("State error - dynamic fee pools require a hook")]
    DynamicFeeWithoutHook,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("Swap error - amount specified is 0")]
    AmountSpecifiedIsZero,
    #[error("Swap error - sqrtPrice limit beyond MIN/MAX ratio")]
    SqrtPriceLimitOutOfBounds,
    #[error("Swap error - sqrtPrice limit on the wrong side of the current price")]
    SqrtPriceLimitCurrent,
    #[error("Swap error - currency is not part of the pool")]
    CurrencyNotInPool,
    #[error("Swap error - hook permissions alter swap outcome")]
    UnsupportedHook,
    #[error("Swap error - no tick data available")]
    NoTickData,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickListError {
    #[error("Tick list error - tick spacing must be positive")]
    ZeroTickSpacing,
    #[error("Tick list error - tick {0} is not a multiple of the spacing")]
    NotAligned(i32),
    #[error("Tick list error - net liquidity does not sum to zero")]
    NonZeroNet,
    #[error("Tick list error - ticks are not strictly sorted")]
    NotSorted,
    #[error("Tick list error - tick {0} not found")]
    NotFound(i32),
    #[error("Tick list error - tick is below the smallest initialized tick")]
    BelowSmallest,
    #[error("Tick list error - tick is at or above the largest initialized tick")]
    AtOrAboveLargest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("Currency error - addresses are equal")]
    SameAddress,
    #[error("Currency error - chain ids differ")]
    ChainIdMismatch,
    #[error("Currency error - currencies do not match")]
    CurrencyMismatch,
    #[error("Currency error - amount exceeds MaxUint256")]
    AmountExceedsMax,
    #[error("Currency error - decimals must be below 255")]
    Decimals,
    #[error("Currency error - {0} decimal places exceed the currency decimals")]
    TooManyDecimals(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Position error - tickLower must be below tickUpper")]
    TickOrder,
    #[error("Position error - tickLower out of range or unaligned")]
    TickLower,
    #[error("Position error - tickUpper out of range or unaligned")]
    TickUpper,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Route error - no pools")]
    NoPools,
    #[error("Route error - pools span multiple chains")]
    ChainIds,
    #[error("Route error - input currency is not in the first pool")]
    Input,
    #[error("Route error - output currency is not in the last pool")]
    Output,
    #[error("Route error - consecutive pools do not share a currency")]
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("Trade error - at least one route is required")]
    NoRoutes,
    #[error("Trade error - routes disagree on the input currency")]
    InputCurrencyMismatch,
    #[error("Trade error - routes disagree on the output currency")]
    OutputCurrencyMismatch,
    #[error("Trade error - a pool is used by more than one route")]
    PoolsDuplicated,
    #[error("Trade error - slippage tolerance is negative")]
    SlippageTolerance,
    #[error("Trade error - max hops must be positive")]
    MaxHops,
    #[error("Trade error - max number of results must be positive")]
    MaxNumResults,
    #[error("Trade error - no pools to search")]
    NoPools,
    #[error("Trade error - sorted list exceeds its max size")]
    SortedListSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),
    #[error(transparent)]
    StateError(#[from] StateError),
    #[error(transparent)]
    SwapError(#[from] SwapError),
    #[error(transparent)]
    TickListError(#[from] TickListError),
    #[error(transparent)]
    CurrencyError(#[from] CurrencyError),
    #[error(transparent)]
    PositionError(#[from] PositionError),
    #[error(transparent)]
    RouteError(#[from] RouteError),
    #[error(transparent)]
    TradeError(#[from] TradeError),
}

/// Expected, recoverable reasons a pool cannot fill a quote.
///
/// Route search branches on these; they never escape as an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PruneReason {
    #[error("input amount too small to produce any output")]
    InsufficientInputAmount,
    #[error("pool reserves cannot cover the requested amount")]
    InsufficientReserves,
    #[error("price limit reached before the amount was filled")]
    PriceLimitReached,
}

/// Outcome of a quote that may be pruned.
pub type Quote<T> = Result<T, PruneReason>;
