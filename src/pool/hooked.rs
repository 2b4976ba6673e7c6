use super::swap::{PoolState, SwapResult};
use super::{encode_address, sqrt_price_to_price};
use crate::currency::Currency;
use crate::error::{Error, Quote, StateError, SwapError};
use crate::fractions::{CurrencyAmount, Price};
use crate::tick::{NoTickDataProvider, TickDataProvider};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Fee sentinel marking a pool whose hook sets the fee per swap.
pub const DYNAMIC_FEE_FLAG: u32 = 0x800000;
/// Largest tick spacing a pool key accepts.
pub const MAX_TICK_SPACING: i32 = i16::MAX as i32;

/// Callbacks a hook contract is allowed to run, encoded in the low 14 bits
/// of its address.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HookPermissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
    pub before_swap_returns_delta: bool,
    pub after_swap_returns_delta: bool,
    pub after_add_liquidity_returns_delta: bool,
    pub after_remove_liquidity_returns_delta: bool,
}

impl HookPermissions {
    pub fn from_address(hooks: Address) -> Self {
        let bits = u16::from_be_bytes([hooks[18], hooks[19]]);
        let flag = |bit: u16| bits & (1 << bit) != 0;
        Self {
            before_initialize: flag(13),
            after_initialize: flag(12),
            before_add_liquidity: flag(11),
            after_add_liquidity: flag(10),
            before_remove_liquidity: flag(9),
            after_remove_liquidity: flag(8),
            before_swap: flag(7),
            after_swap: flag(6),
            before_donate: flag(5),
            after_donate: flag(4),
            before_swap_returns_delta: flag(3),
            after_swap_returns_delta: flag(2),
            after_add_liquidity_returns_delta: flag(1),
            after_remove_liquidity_returns_delta: flag(0),
        }
    }

    pub fn has_initialize_permissions(&self) -> bool {
        self.before_initialize || self.after_initialize
    }

    pub fn has_liquidity_permissions(&self) -> bool {
        self.before_add_liquidity
            || self.after_add_liquidity
            || self.before_remove_liquidity
            || self.after_remove_liquidity
    }

    pub fn has_swap_permissions(&self) -> bool {
        self.before_swap || self.after_swap
    }

    pub fn has_donate_permissions(&self) -> bool {
        self.before_donate || self.after_donate
    }
}

/// Id of a pool key: `keccak256(abi.encode(currency0, currency1, fee, tickSpacing, hooks))`.
///
/// Currencies must already be in canonical order.
pub fn compute_pool_id(
    currency0: &Currency,
    currency1: &Currency,
    fee: u32,
    tick_spacing: i32,
    hooks: Address,
) -> B256 {
    let mut encoded = [0u8; 160];
    encoded[..32].copy_from_slice(&encode_address(currency0.address()));
    encoded[32..64].copy_from_slice(&encode_address(currency1.address()));
    encoded[64..96].copy_from_slice(&U256::from(fee).to_be_bytes::<32>());
    // int24, sign-extended to a full word
    if tick_spacing < 0 {
        encoded[96..124].fill(0xff);
    }
    encoded[124..128].copy_from_slice(&tick_spacing.to_be_bytes());
    encoded[128..].copy_from_slice(&encode_address(hooks));
    keccak256(encoded)
}

/// A concentrated-liquidity pool held by a singleton pool manager.
///
/// Either side may be the native currency, which always sorts first.
/// Currencies match exactly: a native pool and its wrapped-token twin are
/// different pools.
#[derive(Clone, Debug)]
pub struct HookedPool<P = NoTickDataProvider> {
    currency0: Currency,
    currency1: Currency,
    fee: u32,
    hooks: Address,
    pool_id: B256,
    state: PoolState<P>,
}

impl<P> HookedPool<P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency_a: Currency,
        currency_b: Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: P,
    ) -> Result<Self, Error> {
        let (currency0, currency1) = if currency_a.sorts_before(&currency_b)? {
            (currency_a, currency_b)
        } else {
            (currency_b, currency_a)
        };
        if tick_spacing > MAX_TICK_SPACING {
            return Err(StateError::TickSpacing.into());
        }
        let swap_fee = if fee == DYNAMIC_FEE_FLAG {
            if hooks == Address::ZERO {
                return Err(StateError::DynamicFeeWithoutHook.into());
            }
            0
        } else {
            fee
        };
        let state = PoolState::new(
            sqrt_price_x96,
            tick_current,
            liquidity,
            tick_spacing,
            swap_fee,
            tick_data_provider,
        )?;
        let pool_id = compute_pool_id(&currency0, &currency1, fee, tick_spacing, hooks);
        Ok(Self {
            currency0,
            currency1,
            fee,
            hooks,
            pool_id,
            state,
        })
    }

    pub fn currency0(&self) -> &Currency {
        &self.currency0
    }

    pub fn currency1(&self) -> &Currency {
        &self.currency1
    }

    pub fn chain_id(&self) -> u64 {
        self.currency0.chain_id()
    }

    /// The fee of the pool key, possibly [`DYNAMIC_FEE_FLAG`].
    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn is_dynamic_fee(&self) -> bool {
        self.fee == DYNAMIC_FEE_FLAG
    }

    pub fn hooks(&self) -> Address {
        self.hooks
    }

    pub fn hook_permissions(&self) -> HookPermissions {
        HookPermissions::from_address(self.hooks)
    }

    pub fn pool_id(&self) -> B256 {
        self.pool_id
    }

    pub fn tick_spacing(&self) -> i32 {
        self.state.tick_spacing
    }

    pub fn sqrt_price_x96(&self) -> U256 {
        self.state.sqrt_price_x96
    }

    pub fn liquidity(&self) -> u128 {
        self.state.liquidity
    }

    pub fn tick_current(&self) -> i32 {
        self.state.tick_current
    }

    pub fn state(&self) -> &PoolState<P> {
        &self.state
    }

    pub fn involves_currency(&self, currency: &Currency) -> bool {
        currency == &self.currency0 || currency == &self.currency1
    }

    /// Swaps can be simulated only when no hook callback can change them.
    pub fn supports_quoting(&self) -> bool {
        !self.is_dynamic_fee() && !self.hook_permissions().has_swap_permissions()
    }

    pub fn currency0_price(&self) -> Result<Price, Error> {
        sqrt_price_to_price(&self.currency0, &self.currency1, self.state.sqrt_price_x96)
    }

    pub fn currency1_price(&self) -> Result<Price, Error> {
        self.currency0_price()?.invert()
    }

    pub fn price_of(&self, currency: &Currency) -> Result<Price, Error> {
        if currency == &self.currency0 {
            self.currency0_price()
        } else if currency == &self.currency1 {
            self.currency1_price()
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    fn zero_for_one_paying(&self, currency: &Currency) -> Result<bool, Error> {
        if !self.supports_quoting() {
            return Err(SwapError::UnsupportedHook.into());
        }
        if currency == &self.currency0 {
            Ok(true)
        } else if currency == &self.currency1 {
            Ok(false)
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    fn side(&self, zero: bool) -> Currency {
        if zero {
            self.currency0.clone()
        } else {
            self.currency1.clone()
        }
    }

    fn advanced(&self, result: &SwapResult) -> Self
    where
        P: Clone,
    {
        Self {
            currency0: self.currency0.clone(),
            currency1: self.currency1.clone(),
            fee: self.fee,
            hooks: self.hooks,
            pool_id: self.pool_id,
            state: self.state.advanced(result),
        }
    }
}

impl<P: TickDataProvider + Clone> HookedPool<P> {
    pub async fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, Self)>, Error> {
        let zero_for_one = self.zero_for_one_paying(input_amount.currency())?;
        let quote = self
            .state
            .quote_exact_input(zero_for_one, input_amount.quotient_u256()?, sqrt_price_limit_x96)
            .await?;
        let (amount_out, result) = match quote {
            Ok(filled) => filled,
            Err(reason) => return Ok(Err(reason)),
        };
        let output = CurrencyAmount::from_u256(self.side(!zero_for_one), amount_out)?;
        Ok(Ok((output, self.advanced(&result))))
    }

    pub async fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, Self)>, Error> {
        let zero_for_one = !self.zero_for_one_paying(output_amount.currency())?;
        let quote = self
            .state
            .quote_exact_output(zero_for_one, output_amount.quotient_u256()?, sqrt_price_limit_x96)
            .await?;
        let (amount_in, result) = match quote {
            Ok(filled) => filled,
            Err(reason) => return Ok(Err(reason)),
        };
        let input = CurrencyAmount::from_u256(self.side(zero_for_one), amount_in)?;
        Ok(Ok((input, self.advanced(&result))))
    }
}
