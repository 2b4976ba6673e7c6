#![allow(dead_code)]

use clmm_route_engine::{
    currency::{Currency, Token},
    fractions::CurrencyAmount,
    math::{bit_math, full_math, sqrt_price_math, swap_math, tick_math},
    pool::{AmmPool, Pair, PoolState, SwapParams},
    tick::{Tick, TickBitmapDataProvider, TickListDataProvider},
    trade::{best_trade_exact_in, BestTradeOptions},
    Address, I256, Q96, U256,
};
use criterion::{async_executor::FuturesExecutor, black_box, Criterion};

const E18: u128 = 1_000_000_000_000_000_000;

fn ladder() -> Vec<Tick> {
    let mut ticks = Vec::new();
    for i in 1..=20i32 {
        let net = (E18 / 20) as i128;
        ticks.push(Tick::new(-600 * i, net as u128, net).unwrap());
        ticks.push(Tick::new(600 * i, net as u128, -net).unwrap());
    }
    ticks.sort_by_key(|tick| tick.index);
    ticks
}

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");
    group.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in (-887_272..=887_272).step_by(88_727) {
                black_box(tick_math::get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });
    let ratios: Vec<U256> = (-887_000..=887_000)
        .step_by(88_700)
        .map(|tick| tick_math::get_sqrt_ratio_at_tick(tick).unwrap())
        .collect();
    group.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| {
            for ratio in &ratios {
                black_box(tick_math::get_tick_at_sqrt_ratio(black_box(*ratio)).unwrap());
            }
        })
    });
    group.finish();
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let sqrt_a = Q96;
    let sqrt_b = tick_math::get_sqrt_ratio_at_tick(6_000).unwrap();
    let mut group = c.benchmark_group("sqrt_price_math");
    group.bench_function("get_amount_0_delta", |b| {
        b.iter(|| {
            sqrt_price_math::get_amount_0_delta(black_box(sqrt_a), black_box(sqrt_b), E18, true)
                .unwrap()
        })
    });
    group.bench_function("get_amount_1_delta", |b| {
        b.iter(|| {
            sqrt_price_math::get_amount_1_delta(black_box(sqrt_a), black_box(sqrt_b), E18, false)
                .unwrap()
        })
    });
    group.bench_function("get_next_sqrt_price_from_input", |b| {
        b.iter(|| {
            sqrt_price_math::get_next_sqrt_price_from_input(
                black_box(sqrt_a),
                E18,
                black_box(U256::from(10u128.pow(17))),
                true,
            )
            .unwrap()
        })
    });
    group.finish();
}

pub fn bench_swap_math(c: &mut Criterion) {
    let target = tick_math::get_sqrt_ratio_at_tick(-600).unwrap();
    c.bench_function("compute_swap_step", |b| {
        b.iter(|| {
            swap_math::compute_swap_step(
                black_box(Q96),
                black_box(target),
                E18,
                black_box(I256::from_raw(U256::from(10u128.pow(16)))),
                3000,
            )
            .unwrap()
        })
    });
}

pub fn bench_full_math(c: &mut Criterion) {
    let a = U256::MAX / U256::from(3u8);
    let b = U256::from(10u128.pow(30));
    let denominator = U256::MAX / U256::from(7u8);
    let mut group = c.benchmark_group("full_math");
    group.bench_function("mul_div", |bench| {
        bench.iter(|| full_math::mul_div(black_box(a), black_box(b), black_box(denominator)).unwrap())
    });
    group.bench_function("mul_div_rounding_up", |bench| {
        bench.iter(|| {
            full_math::mul_div_rounding_up(black_box(a), black_box(b), black_box(denominator)).unwrap()
        })
    });
    group.finish();
}

pub fn bench_bit_math(c: &mut Criterion) {
    let values: Vec<U256> = (0..256).step_by(17).map(|bit| U256::from(1u8) << bit).collect();
    let mut group = c.benchmark_group("bit_math");
    group.bench_function("most_significant_bit", |b| {
        b.iter(|| {
            for value in &values {
                black_box(bit_math::most_significant_bit(black_box(*value)).unwrap());
            }
        })
    });
    group.bench_function("least_significant_bit", |b| {
        b.iter(|| {
            for value in &values {
                black_box(bit_math::least_significant_bit(black_box(*value)).unwrap());
            }
        })
    });
    group.finish();
}

pub fn bench_pool_swap(c: &mut Criterion) {
    let list = PoolState::new(Q96, 0, E18, 60, 3000, TickListDataProvider::new(ladder(), 60).unwrap())
        .unwrap();
    let bitmap =
        PoolState::new(Q96, 0, E18, 60, 3000, TickBitmapDataProvider::new(ladder(), 60).unwrap())
            .unwrap();
    let params = SwapParams::new(true, I256::from_raw(U256::from(E18 / 2)), None);

    let mut group = c.benchmark_group("pool_swap");
    group.bench_function("tick_list", |b| {
        b.to_async(FuturesExecutor)
            .iter(|| async { list.swap(black_box(params)).await.unwrap() })
    });
    group.bench_function("tick_bitmap", |b| {
        b.to_async(FuturesExecutor)
            .iter(|| async { bitmap.swap(black_box(params)).await.unwrap() })
    });
    group.finish();
}

pub fn bench_best_trade(c: &mut Criterion) {
    let tokens: Vec<Token> = (1..=6u8)
        .map(|n| Token::new(1, Address::repeat_byte(n), 18, None, None).unwrap())
        .collect();
    let amount = |token: &Token, raw: u128| {
        CurrencyAmount::from_raw_amount(Currency::Token(token.clone()), raw).unwrap()
    };
    let mut pools: Vec<AmmPool> = Vec::new();
    for (i, a) in tokens.iter().enumerate() {
        for b in &tokens[i + 1..] {
            pools.push(Pair::new(amount(a, E18), amount(b, E18 * 2)).unwrap().into());
        }
    }
    let amount_in = amount(&tokens[0], E18 / 100);
    let currency_out: Currency = tokens[5].clone().into();

    c.bench_function("best_trade_exact_in", |b| {
        b.to_async(FuturesExecutor).iter(|| async {
            best_trade_exact_in(&pools, &amount_in, &currency_out, BestTradeOptions::default())
                .await
                .unwrap()
        })
    });
}
