use std::{collections::HashMap, sync::Arc, thread};

use fruitslot_core::{
    classify, evaluate, BalanceStore, CreditLedger, EngineConfig, EngineError, Grid, Line,
    LineClass, ProvablyFairRng, RandSource, RandomSource, SlotEngine, Symbol, SymbolGenerator,
};
use proptest::prelude::*;
use Symbol::*;

/// Top row as given, every other cell chosen so nothing else can win.
fn grid_with_top(top: [Symbol; 4]) -> Grid {
    Grid::from_rows([
        top,
        [Banana, Orange, Cucumber, Grape],
        [Cucumber, Grape, Banana, Orange],
        [Orange, Banana, Grape, Cucumber],
    ])
}

#[test]
fn scenario_top_row_all_apple() {
    let result = evaluate(&grid_with_top([Apple; 4]));
    assert!(result.is_win);
    assert_eq!(result.matched_symbol, Some(Apple));
    assert!(!result.is_wildcard_win);
    assert_eq!(result.line, Some(Line::Top));
    assert_eq!(result.positions, Line::Top.positions().to_vec());
}

#[test]
fn scenario_three_apples_and_joker() {
    let result = evaluate(&grid_with_top([Apple, Apple, Apple, Joker]));
    assert!(result.is_win);
    assert_eq!(result.matched_symbol, Some(Apple));
    assert!(result.is_wildcard_win);
    assert_eq!(result.line, Some(Line::Top));
}

#[test]
fn scenario_two_apples_two_jokers() {
    let result = evaluate(&grid_with_top([Apple, Apple, Joker, Joker]));
    assert!(result.is_win);
    assert_eq!(result.matched_symbol, Some(Apple));
    assert!(result.is_wildcard_win);
    assert_eq!(result.line, Some(Line::Top));
}

#[test]
fn scenario_distinct_fruits_lose() {
    let grid = grid_with_top([Apple, Banana, Orange, Cucumber]);
    assert_eq!(classify(grid.line(Line::Top)), LineClass::NoWin);
    let result = evaluate(&grid);
    assert!(!result.is_win);
    assert_eq!(result.matched_symbol, None);
    assert_eq!(result.line, None);
    assert!(result.positions.is_empty());
}

#[test]
fn scenario_spin_refused_below_cost() {
    let engine = SlotEngine::default();
    let mut rng = RandSource::seeded(5);
    assert_eq!(
        engine.spin(5, &mut rng),
        Err(EngineError::InsufficientBalance { balance: 5, cost: 10 })
    );
}

#[test]
fn top_row_beats_diagonal() {
    let grid = Grid::from_rows([
        [Orange, Orange, Orange, Orange],
        [Banana, Orange, Cucumber, Grape],
        [Cucumber, Grape, Orange, Banana],
        [Banana, Cucumber, Grape, Orange],
    ]);
    assert_eq!(classify(grid.line(Line::DiagonalDown)), LineClass::AllMatch(Orange));
    assert_eq!(evaluate(&grid).line, Some(Line::Top));
}

#[test]
fn every_composition_classifies_once() {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for a in Symbol::ALL {
        for b in Symbol::ALL {
            for c in Symbol::ALL {
                for d in Symbol::ALL {
                    let line = [a, b, c, d];
                    let class = classify(line);
                    let jokers = line.iter().filter(|s| s.is_wild()).count();
                    let kind = match class {
                        LineClass::AllMatch(s) => {
                            assert!(line.iter().all(|&x| x == s));
                            "all"
                        }
                        LineClass::OneWild(s) => {
                            assert_eq!(jokers, 1);
                            assert!(!s.is_wild());
                            "one"
                        }
                        LineClass::TwoWild(s) => {
                            assert_eq!(jokers, 2);
                            assert!(!s.is_wild());
                            "two"
                        }
                        LineClass::NoWin => "none",
                    };
                    *counts.entry(kind).or_default() += 1;

                    for line_id in Line::ALL {
                        let mut reels = [[Banana; 4]; 4];
                        for (pos, sym) in line_id.positions().iter().zip(line) {
                            reels[pos.reel][pos.row] = sym;
                        }
                        let grid = Grid::from_reels(reels);
                        assert_eq!(classify(grid.line(line_id)), class);
                    }
                }
            }
        }
    }
    assert_eq!(counts.values().sum::<usize>(), 6usize.pow(4));
    assert_eq!(counts["all"], 6);
    // 5 fruits x 4 joker slots
    assert_eq!(counts["one"], 20);
    // 5 fruits x 6 joker placements
    assert_eq!(counts["two"], 30);
}

fn joker_and_fruit_frequencies(config: EngineConfig, draws: usize) -> HashMap<Symbol, f64> {
    let generator = SymbolGenerator::new(&config);
    let mut rng = RandSource::seeded(0xF00D);
    let mut counts: HashMap<Symbol, usize> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(generator.draw(&mut rng)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(s, n)| (s, n as f64 / draws as f64))
        .collect()
}

#[test]
fn draw_distribution_classic() {
    let freq = joker_and_fruit_frequencies(EngineConfig::default(), 200_000);
    assert!((freq[&Joker] - 0.10).abs() < 0.005, "{freq:?}");
    for fruit in [Apple, Banana, Orange, Cucumber] {
        assert!((freq[&fruit] - 0.225).abs() < 0.005, "{freq:?}");
    }
    assert!(!freq.contains_key(&Grape));
}

#[test]
fn draw_distribution_extended() {
    let freq = joker_and_fruit_frequencies(EngineConfig::extended(), 200_000);
    assert!((freq[&Joker] - 0.10).abs() < 0.005, "{freq:?}");
    for fruit in [Apple, Banana, Orange, Cucumber, Grape] {
        assert!((freq[&fruit] - 0.18).abs() < 0.005, "{freq:?}");
    }
}

#[test]
fn provably_fair_grid_verifies() {
    let engine = SlotEngine::default();
    let out = engine.spin_with_seeds("server-seed", "client-seed", 3, 100).unwrap();
    assert!(engine.verify_grid("server-seed", "client-seed", 3, &out.grid));
    let mut reels = *out.grid.reels();
    reels[0][0] = if reels[0][0] == Apple { Banana } else { Apple };
    assert!(!engine.verify_grid("server-seed", "client-seed", 3, &Grid::from_reels(reels)));

    let mut rng = ProvablyFairRng::new("server-seed", "client-seed", 3);
    assert_eq!(engine.generator().fill_grid(&mut rng), out.grid);
}

#[test]
fn concurrent_spins_conserve_credits() {
    let ledger = Arc::new(CreditLedger::new());
    let engine = Arc::new(SlotEngine::default());
    ledger.open_account("shared", 1_000_000);

    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let ledger = Arc::clone(&ledger);
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut rng = RandSource::seeded(t);
                let mut delta: i64 = 0;
                for _ in 0..500 {
                    let out = ledger.spin("shared", &engine, &mut rng).unwrap();
                    delta += out.balance as i64 - out.balance_before as i64;
                }
                delta
            })
        })
        .collect();

    let delta: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(ledger.read("shared").unwrap() as i64, 1_000_000 + delta);
}

struct Counting<R> {
    inner: R,
    draws: usize,
}

impl<R: RandomSource> RandomSource for Counting<R> {
    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        self.inner.next_unit()
    }
}

proptest! {
    #[test]
    fn prop_balance_invariant(balance in 10u64..1_000_000, seed in any::<u64>()) {
        let engine = SlotEngine::default();
        let out = engine.spin(balance, &mut RandSource::seeded(seed)).unwrap();
        let expected = balance - 10 + if out.result.is_win { 50 } else { 0 };
        prop_assert_eq!(out.balance, expected);
        prop_assert!(out.balance >= balance - 10);
        prop_assert_eq!(out.payout, out.balance + 10 - balance);
    }

    #[test]
    fn prop_refusal_invariant(balance in 0u64..10, seed in any::<u64>()) {
        let engine = SlotEngine::default();
        let mut rng = Counting { inner: RandSource::seeded(seed), draws: 0 };
        let err = engine.spin(balance, &mut rng).unwrap_err();
        prop_assert_eq!(err, EngineError::InsufficientBalance { balance, cost: 10 });
        prop_assert_eq!(rng.draws, 0);
    }

    #[test]
    fn prop_reported_line_is_first_winner(seed in any::<u64>()) {
        let engine = SlotEngine::default();
        let grid = engine.generator().fill_grid(&mut RandSource::seeded(seed));
        let result = evaluate(&grid);
        let first = Line::ALL
            .into_iter()
            .find(|&l| classify(grid.line(l)) != LineClass::NoWin);
        prop_assert_eq!(result.line, first);
        prop_assert_eq!(result.is_win, first.is_some());
    }
}
