use crate::currency::{Currency, Token};
use crate::error::{Error, PruneReason, Quote, SwapError};
use crate::fractions::{CurrencyAmount, Price};
use alloy_primitives::{keccak256, Address, B256};
use num_bigint::BigInt;
use num_traits::Zero;

const FEE_NUMERATOR: u32 = 997;
const FEE_DENOMINATOR: u32 = 1000;

/// CREATE2 address of the pair for two tokens, given any order.
pub fn compute_pair_address(
    factory: Address,
    token_a: &Token,
    token_b: &Token,
    init_code_hash: B256,
) -> Result<Address, Error> {
    let (token0, token1) = if token_a.sorts_before(token_b)? {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    let salt = pair_salt(token0, token1);
    Ok(factory.create2(salt.0, init_code_hash.0))
}

fn pair_salt(token0: &Token, token1: &Token) -> B256 {
    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(token0.address.as_slice());
    packed[20..].copy_from_slice(token1.address.as_slice());
    keccak256(packed)
}

/// A constant-product pair with the classic 0.3% fee.
#[derive(Clone, Debug)]
pub struct Pair {
    reserve0: CurrencyAmount,
    reserve1: CurrencyAmount,
}

impl Pair {
    /// Reserves may be given in either order; native amounts are held as
    /// their wrapped token.
    pub fn new(reserve_a: CurrencyAmount, reserve_b: CurrencyAmount) -> Result<Self, Error> {
        let (reserve_a, reserve_b) = (reserve_a.wrapped(), reserve_b.wrapped());
        let a_first = reserve_a
            .currency()
            .wrapped()
            .sorts_before(reserve_b.currency().wrapped())?;
        let (reserve0, reserve1) = if a_first {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        Ok(Self { reserve0, reserve1 })
    }

    pub fn token0(&self) -> &Token {
        self.reserve0.currency().wrapped()
    }

    pub fn token1(&self) -> &Token {
        self.reserve1.currency().wrapped()
    }

    pub fn currency0(&self) -> &Currency {
        self.reserve0.currency()
    }

    pub fn currency1(&self) -> &Currency {
        self.reserve1.currency()
    }

    pub fn reserve0(&self) -> &CurrencyAmount {
        &self.reserve0
    }

    pub fn reserve1(&self) -> &CurrencyAmount {
        &self.reserve1
    }

    pub fn chain_id(&self) -> u64 {
        self.token0().chain_id
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        token == self.token0() || token == self.token1()
    }

    pub fn address(&self, factory: Address, init_code_hash: B256) -> Address {
        factory.create2(self.pool_key().0, init_code_hash.0)
    }

    /// `keccak256(token0 ++ token1)`, the pair's CREATE2 salt.
    pub fn pool_key(&self) -> B256 {
        pair_salt(self.token0(), self.token1())
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&CurrencyAmount, Error> {
        if token == self.token0() {
            Ok(&self.reserve0)
        } else if token == self.token1() {
            Ok(&self.reserve1)
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    /// Price of token0 in token1; fails while reserve0 is empty.
    pub fn token0_price(&self) -> Result<Price, Error> {
        Price::new(
            self.currency0().clone(),
            self.currency1().clone(),
            self.reserve0.quotient(),
            self.reserve1.quotient(),
        )
    }

    pub fn token1_price(&self) -> Result<Price, Error> {
        Price::new(
            self.currency1().clone(),
            self.currency0().clone(),
            self.reserve1.quotient(),
            self.reserve0.quotient(),
        )
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

    fn is_empty(&self) -> bool {
        self.reserve0.quotient().is_zero() || self.reserve1.quotient().is_zero()
    }

    /// (input reserve, output reserve) for a swap that pays in `token`.
    fn reserves_from(&self, token: &Token) -> Result<(&CurrencyAmount, &CurrencyAmount), Error> {
        if token == self.token0() {
            Ok((&self.reserve0, &self.reserve1))
        } else if token == self.token1() {
            Ok((&self.reserve1, &self.reserve0))
        } else {
            Err(SwapError::CurrencyNotInPool.into())
        }
    }

    fn with_reserves(
        &self,
        input_reserve: &CurrencyAmount,
        input: &BigInt,
        output_reserve: &CurrencyAmount,
        output: &BigInt,
    ) -> Result<Pair, Error> {
        Pair::new(
            CurrencyAmount::from_raw_amount(
                input_reserve.currency().clone(),
                input_reserve.quotient() + input,
            )?,
            CurrencyAmount::from_raw_amount(
                output_reserve.currency().clone(),
                output_reserve.quotient() - output,
            )?,
        )
    }

    /// Output for an exact input, and the pair after the swap.
    pub fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
    ) -> Result<Quote<(CurrencyAmount, Pair)>, Error> {
        let (input_reserve, output_reserve) = self.reserves_from(input_amount.currency().wrapped())?;
        if self.is_empty() {
            return Ok(Err(PruneReason::InsufficientReserves));
        }

        let amount_in = input_amount.quotient();
        let input_with_fee = &amount_in * FEE_NUMERATOR;
        let numerator = &input_with_fee * output_reserve.quotient();
        let denominator = input_reserve.quotient() * FEE_DENOMINATOR + &input_with_fee;
        let amount_out = numerator / denominator;
        if amount_out.is_zero() {
            return Ok(Err(PruneReason::InsufficientInputAmount));
        }

        let next = self.with_reserves(input_reserve, &amount_in, output_reserve, &amount_out)?;
        let output = CurrencyAmount::from_raw_amount(output_reserve.currency().clone(), amount_out)?;
        Ok(Ok((output, next)))
    }

    /// Input needed for an exact output, and the pair after the swap.
    pub fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
    ) -> Result<Quote<(CurrencyAmount, Pair)>, Error> {
        let (output_reserve, input_reserve) = self.reserves_from(output_amount.currency().wrapped())?;
        let amount_out = output_amount.quotient();
        if self.is_empty() || amount_out >= output_reserve.quotient() {
            return Ok(Err(PruneReason::InsufficientReserves));
        }

        let numerator = input_reserve.quotient() * &amount_out * FEE_DENOMINATOR;
        let denominator = (output_reserve.quotient() - &amount_out) * FEE_NUMERATOR;
        let amount_in = numerator / denominator + 1u8;

        let next = self.with_reserves(input_reserve, &amount_in, output_reserve, &amount_out)?;
        let input = CurrencyAmount::from_raw_amount(input_reserve.currency().clone(), amount_in)?;
        Ok(Ok((input, next)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::tests::{ether, token};
    use crate::error::CurrencyError;
    use alloy_primitives::{address, b256};

    fn amount(token: &Token, raw: u64) -> CurrencyAmount {
        CurrencyAmount::from_raw_amount(Currency::Token(token.clone()), raw).unwrap()
    }

    fn pair(r0: u64, r1: u64) -> (Token, Token, Pair) {
        let (t0, t1) = (token(1, 18), token(2, 18));
        let pair = Pair::new(amount(&t1, r1), amount(&t0, r0)).unwrap();
        (t0, t1, pair)
    }

    #[test]
    fn create2_address() {
        let usdc = Token::new(1, address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), 6, None, None).unwrap();
        let dai = Token::new(1, address!("6B175474E89094C44Da98b954EedeAC495271d0F"), 18, None, None).unwrap();
        let factory = Address::repeat_byte(0x11);
        let init_code_hash = b256!("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");
        let expected = address!("b50b5182D6a47EC53a469395AF44e371d7C76ed4");
        assert_eq!(compute_pair_address(factory, &usdc, &dai, init_code_hash).unwrap(), expected);
        assert_eq!(compute_pair_address(factory, &dai, &usdc, init_code_hash).unwrap(), expected);

        let pair = Pair::new(
            CurrencyAmount::from_raw_amount(Currency::Token(usdc), 1).unwrap(),
            CurrencyAmount::from_raw_amount(Currency::Token(dai), 1).unwrap(),
        )
        .unwrap();
        assert_eq!(pair.address(factory, init_code_hash), expected);
    }

    #[test]
    fn sorts_reserves_and_rejects_mixed_chains() {
        let (t0, t1, pair) = pair(100, 200);
        assert_eq!(pair.token0(), &t0);
        assert_eq!(pair.token1(), &t1);
        assert_eq!(pair.reserve_of(&t0).unwrap().quotient(), BigInt::from(100));
        assert!(pair.reserve_of(&token(3, 18)).is_err());

        let other_chain = Token::new(3, Address::repeat_byte(9), 18, None, None).unwrap();
        assert!(matches!(
            Pair::new(amount(&t0, 1), amount(&other_chain, 1)),
            Err(Error::CurrencyError(CurrencyError::ChainIdMismatch))
        ));
    }

    #[test]
    fn native_reserve_is_wrapped() {
        let eth = ether();
        let pair = Pair::new(
            CurrencyAmount::from_raw_amount(Currency::Native(eth.clone()), 10).unwrap(),
            amount(&token(1, 18), 10),
        )
        .unwrap();
        assert!(pair.involves_token(&eth.wrapped));
        assert!(pair.currency0().is_token() && pair.currency1().is_token());
    }

    #[test]
    fn prices() {
        let (t0, t1, pair) = pair(100, 200);
        let p0 = pair.price_of(&t0).unwrap();
        assert_eq!(p0.quote_currency().wrapped(), &t1);
        assert_eq!(p0.to_significant(3, Default::default()).unwrap(), "2");
        assert_eq!(pair.price_of(&t1).unwrap().to_significant(3, Default::default()).unwrap(), "0.5");
    }

    #[test]
    fn output_amount_charges_fee() {
        let (t0, t1, pair) = pair(1000, 1000);
        let (out, next) = pair.get_output_amount(&amount(&t0, 100)).unwrap().unwrap();
        assert_eq!(out.quotient(), BigInt::from(90));
        assert_eq!(out.currency().wrapped(), &t1);
        assert_eq!(next.reserve0().quotient(), BigInt::from(1100));
        assert_eq!(next.reserve1().quotient(), BigInt::from(910));
        // the receiver is untouched
        assert_eq!(pair.reserve0().quotient(), BigInt::from(1000));
    }

    #[test]
    fn input_amount_rounds_up() {
        let (t0, t1, pair) = pair(1000, 1000);
        let (input, next) = pair.get_input_amount(&amount(&t1, 90)).unwrap().unwrap();
        assert_eq!(input.quotient(), BigInt::from(100));
        assert_eq!(input.currency().wrapped(), &t0);
        assert_eq!(next.reserve1().quotient(), BigInt::from(910));
    }

    #[test]
    fn quoting_prunes() {
        let (t0, t1, pair) = pair(1000, 1000);
        assert_eq!(
            pair.get_output_amount(&amount(&t0, 1)).unwrap().unwrap_err(),
            PruneReason::InsufficientInputAmount
        );
        assert_eq!(
            pair.get_input_amount(&amount(&t1, 1000)).unwrap().unwrap_err(),
            PruneReason::InsufficientReserves
        );
        let (_, _, empty) = self::pair(0, 1000);
        assert_eq!(
            empty.get_output_amount(&amount(&t0, 100)).unwrap().unwrap_err(),
            PruneReason::InsufficientReserves
        );
        assert!(matches!(
            pair.get_output_amount(&amount(&token(3, 18), 100)),
            Err(Error::SwapError(SwapError::CurrencyNotInPool))
        ));
    }
}
