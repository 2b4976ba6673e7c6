use clmm_route_engine::{
    currency::{Currency, Token},
    fractions::{CurrencyAmount, Percent},
    math::tick_math::get_sqrt_ratio_at_tick,
    pool::{AmmPool, ConcentratedPool, Pair},
    tick::{Tick, TickListDataProvider},
    trade::{best_trade_exact_in, best_trade_exact_out, BestTradeOptions, Trade},
    Address,
};
use num_bigint::BigInt;

const E18: u128 = 1_000_000_000_000_000_000;

fn token(n: u8) -> Token {
    Token::new(1, Address::repeat_byte(n), 18, None, None).unwrap()
}

fn amount(token: &Token, raw: u128) -> CurrencyAmount {
    CurrencyAmount::from_raw_amount(Currency::Token(token.clone()), raw).unwrap()
}

fn pair<P>(a: &Token, b: &Token, ra: u128, rb: u128) -> AmmPool<P> {
    Pair::new(amount(a, ra), amount(b, rb)).unwrap().into()
}

fn summary<P>(trades: &[Trade<P>]) -> Vec<(u64, u64, usize)> {
    trades
        .iter()
        .map(|trade| {
            let quotient = |value: BigInt| u64::try_from(value).unwrap();
            (
                quotient(trade.input_amount().quotient()),
                quotient(trade.output_amount().quotient()),
                trade.swaps()[0].route.pools().len(),
            )
        })
        .collect()
}

#[tokio::test]
async fn two_hops_beat_a_shallow_direct_pool() {
    let (t0, t1, t2) = (token(1), token(2), token(3));
    let pools: Vec<AmmPool> = vec![
        pair(&t0, &t1, 1000, 2000),
        pair(&t1, &t2, 1000, 2000),
        pair(&t0, &t2, 1000, 1000),
    ];
    let amount_in = amount(&t0, 100);
    let out: Currency = t2.clone().into();

    let all = best_trade_exact_in(&pools, &amount_in, &out, BestTradeOptions::default())
        .await
        .unwrap();
    assert_eq!(summary(&all), vec![(100, 305, 2), (100, 90, 1)]);

    let best = best_trade_exact_in(
        &pools,
        &amount_in,
        &out,
        BestTradeOptions { max_num_results: 1, ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(summary(&best), vec![(100, 305, 2)]);

    let direct = best_trade_exact_in(
        &pools,
        &amount_in,
        &out,
        BestTradeOptions { max_hops: 1, ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(summary(&direct), vec![(100, 90, 1)]);
}

#[tokio::test]
async fn ties_prefer_the_shorter_route() {
    let (t0, t1, t2) = (token(1), token(2), token(3));
    let pools: Vec<AmmPool> = vec![
        pair(&t0, &t1, 1000, 1000),
        pair(&t1, &t2, 650, 750),
        pair(&t0, &t2, 1000, 1000),
    ];
    let trades = best_trade_exact_in(
        &pools,
        &amount(&t0, 100),
        &t2.clone().into(),
        BestTradeOptions { max_num_results: 1, ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(summary(&trades), vec![(100, 90, 1)]);
}

#[tokio::test]
async fn exact_out_ranks_by_input() {
    let (t0, t1, t2) = (token(1), token(2), token(3));
    let pools: Vec<AmmPool> = vec![
        pair(&t0, &t1, 1000, 1000),
        pair(&t1, &t2, 1000, 1000),
        pair(&t0, &t2, 1000, 1000),
    ];
    let trades = best_trade_exact_out(&pools, &t0.clone().into(), &amount(&t2, 90), BestTradeOptions::default())
        .await
        .unwrap();
    assert_eq!(summary(&trades), vec![(100, 90, 1), (112, 90, 2)]);

    let slippage = Percent::new(1, 100).unwrap();
    assert_eq!(
        trades[1].maximum_amount_in(&slippage).unwrap().quotient(),
        BigInt::from(113)
    );
}

#[tokio::test]
async fn mixes_pairs_and_concentrated_pools() {
    let (t0, t1) = (token(1), token(2));
    let ticks = TickListDataProvider::new(
        vec![
            Tick::new(-887220, E18, E18 as i128).unwrap(),
            Tick::new(887220, E18, -(E18 as i128)).unwrap(),
        ],
        60,
    )
    .unwrap();
    let concentrated = ConcentratedPool::new(
        t0.clone(),
        t1.clone(),
        3000,
        60,
        get_sqrt_ratio_at_tick(0).unwrap(),
        E18,
        0,
        ticks,
    )
    .unwrap();
    let pools: Vec<AmmPool<TickListDataProvider>> =
        vec![concentrated.into(), pair(&t0, &t1, 1_000_000, 2_000_000)];

    let trades = best_trade_exact_in(&pools, &amount(&t0, 1000), &t1.clone().into(), BestTradeOptions::default())
        .await
        .unwrap();
    assert_eq!(summary(&trades), vec![(1000, 1992, 1), (1000, 996, 1)]);
    assert!(matches!(trades[1].swaps()[0].route.pools()[0], AmmPool::Concentrated(_)));
}
