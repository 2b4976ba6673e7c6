//! Currencies: ERC-20 style tokens and a chain's native asset.
//!
//! Equality is identity, two tokens are the same currency when they share a
//! chain id and an address regardless of the metadata attached to them.

use crate::error::{CurrencyError, Error};
use alloy_primitives::Address;
use std::hash::{Hash, Hasher};

/// A token identified by `(chain_id, address)`.
#[derive(Clone, Debug)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: Address,
        decimals: u8,
        symbol: Option<String>,
        name: Option<String>,
    ) -> Result<Self, Error> {
        if decimals == u8::MAX {
            return Err(CurrencyError::Decimals.into());
        }
        Ok(Self {
            chain_id,
            address,
            decimals,
            symbol,
            name,
        })
    }

    /// Whether `self` is token0 of a pair with `other`.
    ///
    /// Addresses compare as big-endian bytes, which is the same order as
    /// their lowercase hex strings.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, Error> {
        if self.chain_id != other.chain_id {
            return Err(CurrencyError::ChainIdMismatch.into());
        }
        if self.address == other.address {
            return Err(CurrencyError::SameAddress.into());
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

/// A chain's native asset, paired with the token that wraps it.
#[derive(Clone, Debug)]
pub struct NativeCurrency {
    pub chain_id: u64,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub wrapped: Token,
}

impl NativeCurrency {
    pub fn new(
        wrapped: Token,
        decimals: u8,
        symbol: Option<String>,
        name: Option<String>,
    ) -> Result<Self, Error> {
        if decimals == u8::MAX {
            return Err(CurrencyError::Decimals.into());
        }
        Ok(Self {
            chain_id: wrapped.chain_id,
            decimals,
            symbol,
            name,
            wrapped,
        })
    }
}

#[derive(Clone, Debug)]
pub enum Currency {
    Native(NativeCurrency),
    Token(Token),
}

impl Currency {
    pub fn chain_id(&self) -> u64 {
        match self {
            Currency::Native(native) => native.chain_id,
            Currency::Token(token) => token.chain_id,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Currency::Native(native) => native.decimals,
            Currency::Token(token) => token.decimals,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Currency::Native(native) => native.symbol.as_deref(),
            Currency::Token(token) => token.symbol.as_deref(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Currency::Token(_))
    }

    /// The token a swap router would actually move for this currency.
    pub fn wrapped(&self) -> &Token {
        match self {
            Currency::Native(native) => &native.wrapped,
            Currency::Token(token) => token,
        }
    }

    /// Address as seen by a hook-enabled pool manager, zero for the native asset.
    pub fn address(&self) -> Address {
        match self {
            Currency::Native(_) => Address::ZERO,
            Currency::Token(token) => token.address,
        }
    }

    /// Canonical order of a hook-enabled pool key: the native asset first,
    /// then tokens by address.
    pub fn sorts_before(&self, other: &Currency) -> Result<bool, Error> {
        if self.chain_id() != other.chain_id() {
            return Err(CurrencyError::ChainIdMismatch.into());
        }
        match (self, other) {
            (Currency::Native(_), Currency::Native(_)) => Err(CurrencyError::SameAddress.into()),
            (Currency::Native(_), Currency::Token(_)) => Ok(true),
            (Currency::Token(_), Currency::Native(_)) => Ok(false),
            (Currency::Token(a), Currency::Token(b)) => a.sorts_before(b),
        }
    }

    /// Same currency, or one is the native asset the other wraps.
    pub fn equivalent(&self, other: &Currency) -> bool {
        self == other || self.wrapped() == other.wrapped()
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Currency::Native(a), Currency::Native(b)) => a.chain_id == b.chain_id,
            (Currency::Token(a), Currency::Token(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_native().hash(state);
        self.chain_id().hash(state);
        self.address().hash(state);
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Currency::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Currency::Native(native)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy_primitives::address;

    pub(crate) fn token(n: u8, decimals: u8) -> Token {
        Token::new(1, Address::repeat_byte(n), decimals, Some(format!("T{n}")), None).unwrap()
    }

    pub(crate) fn ether() -> NativeCurrency {
        let weth = Token::new(
            1,
            address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            18,
            Some("WETH".into()),
            Some("Wrapped Ether".into()),
        )
        .unwrap();
        NativeCurrency::new(weth, 18, Some("ETH".into()), Some("Ether".into())).unwrap()
    }

    #[test]
    fn token_equality_ignores_metadata() {
        let a = token(1, 18);
        let mut b = token(1, 6);
        b.symbol = Some("OTHER".into());
        assert_eq!(a, b);
        assert_ne!(a, token(2, 18));

        let other_chain = Token::new(5, a.address, 18, None, None).unwrap();
        assert_ne!(a, other_chain);
    }

    #[test]
    fn token_sorting() {
        let (a, b) = (token(1, 18), token(2, 18));
        assert!(a.sorts_before(&b).unwrap());
        assert!(!b.sorts_before(&a).unwrap());
        assert!(matches!(
            a.sorts_before(&a),
            Err(Error::CurrencyError(CurrencyError::SameAddress))
        ));
        let other_chain = Token::new(5, b.address, 18, None, None).unwrap();
        assert!(matches!(
            a.sorts_before(&other_chain),
            Err(Error::CurrencyError(CurrencyError::ChainIdMismatch))
        ));
    }

    #[test]
    fn rejects_max_decimals() {
        assert!(matches!(
            Token::new(1, Address::ZERO, 255, None, None),
            Err(Error::CurrencyError(CurrencyError::Decimals))
        ));
    }

    #[test]
    fn native_wraps_and_sorts_first() {
        let eth = Currency::Native(ether());
        let weth = Currency::Token(ether().wrapped);
        assert_ne!(eth, weth);
        assert!(eth.equivalent(&weth));
        assert_eq!(eth.wrapped(), weth.wrapped());
        assert_eq!(eth.address(), Address::ZERO);
        assert!(eth.sorts_before(&weth).unwrap());
        assert!(!weth.sorts_before(&eth).unwrap());
        assert!(eth.sorts_before(&eth).is_err());
    }
}
