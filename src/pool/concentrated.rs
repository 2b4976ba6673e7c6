use super::swap::{PoolState, SwapResult};
use super::{encode_address, sqrt_price_to_price};
use crate::currency::{Currency, Token};
use crate::error::{Error, Quote, StateError, SwapError};
use crate::fractions::{CurrencyAmount, Price};
use crate::tick::{NoTickDataProvider, TickDataProvider};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Tick spacing the factory enables for a standard fee tier.
pub fn tick_spacing_for_fee(fee: u32) -> Option<i32> {
    match fee {
        100 => Some(1),
        500 => Some(10),
        3000 => Some(60),
        10000 => Some(200),
        _ => None,
    }
}

/// CREATE2 address of a concentrated-liquidity pool, tokens in either order.
pub fn compute_pool_address(
    factory: Address,
    token_a: &Token,
    token_b: &Token,
    fee: u32,
    init_code_hash: B256,
) -> Result<Address, Error> {
    let (token0, token1) = if token_a.sorts_before(token_b)? {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    let salt = pool_salt(token0, token1, fee);
    Ok(factory.create2(salt.0, init_code_hash.0))
}

// keccak256(abi.encode(token0, token1, uint24 fee))
fn pool_salt(token0: &Token, token1: &Token, fee: u32) -> B256 {
    let mut encoded = [0u8; 96];
    encoded[..32].copy_from_slice(&encode_address(token0.address));
    encoded[32..64].copy_from_slice(&encode_address(token1.address));
    encoded[64..].copy_from_slice(&U256::from(fee).to_be_bytes::<32>());
    keccak256(encoded)
}

/// A concentrated-liquidity pool over two tokens.
///
/// Native amounts are quoted through their wrapped token.
#[derive(Clone, Debug)]
pub struct ConcentratedPool<P = NoTickDataProvider> {
    currency0: Currency,
    currency1: Currency,
    state: PoolState<P>,
}

impl<P> ConcentratedPool<P> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: u32,
        tick_spacing: i32,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: P,
    ) -> Result<Self, Error> {
        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        let state = PoolState::new(
            sqrt_price_x96,
            tick_current,
            liquidity,
            tick_spacing,
            fee,
            tick_data_provider,
        )?;
        Ok(Self {
            currency0: Currency::Token(token0),
            currency1: Currency::Token(token1),
            state,
        })
    }

    /// Like [`ConcentratedPool::new`], taking the spacing from a standard fee tier.
    pub fn with_fee_tier(
        token_a: Token,
        token_b: Token,
        fee: u32,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: P,
    ) -> Result<Self, Error> {
        let tick_spacing = tick_spacing_for_fee(fee).ok_or(StateError::TickSpacing)?;
        Self::new(
            token_a,
            token_b,
            fee,
            tick_spacing,
            sqrt_price_x96,
            liquidity,
            tick_current,
            tick_data_provider,
        )
    }

    pub fn token0(&self) -> &Token {
        self.currency0.wrapped()
    }

    pub fn token1(&self) -> &Token {
        self.currency1.wrapped()
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

    pub fn fee(&self) -> u32 {
        self.state.fee
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

    pub fn tick_data_provider(&self) -> &P {
        &self.state.tick_data_provider
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        token == self.token0() || token == self.token1()
    }

    pub fn token0_price(&self) -> Result<Price, Error> {
        sqrt_price_to_price(&self.currency0, &self.currency1, self.state.sqrt_price_x96)
    }

    pub fn token1_price(&self) -> Result<Price, Error> {
        self.token0_price()?.invert()
    }

    pub fn price_of(&self, token: &Token) -> Result<Price, Error> {
        if token == self.token0() {
            self.token0_price()
        } else if token == self.token1() {
            self.token1_price()
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    pub fn pool_key(&self) -> B256 {
        pool_salt(self.token0(), self.token1(), self.state.fee)
    }

    pub fn address(&self, factory: Address, init_code_hash: B256) -> Address {
        factory.create2(self.pool_key().0, init_code_hash.0)
    }

    /// Whether paying in `token` swaps token0 for token1.
    fn zero_for_one_paying(&self, token: &Token) -> Result<bool, Error> {
        if token == self.token0() {
            Ok(true)
        } else if token == self.token1() {
            Ok(false)
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    fn out_currency(&self, zero_for_one: bool) -> Currency {
        if zero_for_one {
            self.currency1.clone()
        } else {
            self.currency0.clone()
        }
    }

    fn advanced(&self, result: &SwapResult) -> Self
    where
        P: Clone,
    {
        Self {
            currency0: self.currency0.clone(),
            currency1: self.currency1.clone(),
            state: self.state.advanced(result),
        }
    }
}

impl<P: TickDataProvider + Clone> ConcentratedPool<P> {
    /// Output for an exact input together with the pool after the swap.
    pub async fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, Self)>, Error> {
        let zero_for_one = self.zero_for_one_paying(input_amount.currency().wrapped())?;
        let quote = self
            .state
            .quote_exact_input(zero_for_one, input_amount.quotient_u256()?, sqrt_price_limit_x96)
            .await?;
        let (amount_out, result) = match quote {
            Ok(filled) => filled,
            Err(reason) => return Ok(Err(reason)),
        };
        let output = CurrencyAmount::from_u256(self.out_currency(zero_for_one), amount_out)?;
        Ok(Ok((output, self.advanced(&result))))
    }

    /// Input needed for an exact output together with the pool after the swap.
    pub async fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<Quote<(CurrencyAmount, Self)>, Error> {
        let zero_for_one = !self.zero_for_one_paying(output_amount.currency().wrapped())?;
        let quote = self
            .state
            .quote_exact_output(zero_for_one, output_amount.quotient_u256()?, sqrt_price_limit_x96)
            .await?;
        let (amount_in, result) = match quote {
            Ok(filled) => filled,
            Err(reason) => return Ok(Err(reason)),
        };
        let in_currency = self.out_currency(!zero_for_one);
        let input = CurrencyAmount::from_u256(in_currency, amount_in)?;
        Ok(Ok((input, self.advanced(&result))))
    }
}
