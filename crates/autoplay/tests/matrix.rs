use fivedice_autoplay::{best_category, reroll_plan, run_autoplay, AutoplayConfig, AutoplayResult};
use fivedice_core::{BonusEventConfig, Category, DiceSet, GameConfig, TokenState};

fn dice(values: [u8; 5]) -> DiceSet {
    DiceSet::from_values(values).expect("dice")
}

macro_rules! reroll_case {
    ($name:ident, $values:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let plan = reroll_plan(&dice($values), &Category::SELECTABLE);
            let expected: Vec<usize> = $expected.to_vec();
            assert_eq!(plan, expected);
        }
    };
}

macro_rules! best_case {
    ($name:ident, $values:expr, $category:expr, $score:expr) => {
        #[test]
        fn $name() {
            assert_eq!(
                best_category(&dice($values), &Category::SELECTABLE),
                Some(($category, $score))
            );
        }
    };
}

reroll_case!(reroll_keeps_pair, [2, 5, 2, 3, 6], [1usize, 3, 4]);
reroll_case!(reroll_keeps_triple, [4, 4, 1, 4, 6], [2usize, 4]);
reroll_case!(reroll_tie_keeps_high_face, [1, 1, 3, 3, 5], [0usize, 1, 4]);
reroll_case!(reroll_all_distinct_keeps_six, [1, 2, 4, 5, 6], [0usize, 1, 2, 3]);
reroll_case!(reroll_holds_large_straight, [1, 2, 3, 4, 5], [0usize; 0]);
reroll_case!(reroll_holds_full_house, [3, 3, 5, 5, 5], [0usize; 0]);
reroll_case!(reroll_holds_all_same, [2, 2, 2, 2, 2], [0usize; 0]);

best_case!(best_all_same, [6, 6, 6, 6, 6], Category::AllSame, 50);
best_case!(best_large_straight, [2, 3, 4, 5, 6], Category::LargeStraight, 40);
best_case!(best_full_house_over_chance, [2, 2, 3, 3, 3], Category::FullHouse, 25);
best_case!(best_three_kind_first_on_tie, [6, 6, 6, 5, 4], Category::ThreeOfAKind, 27);
best_case!(best_chance_fallback, [1, 2, 4, 5, 6], Category::SumAll, 18);

#[test]
fn best_category_skips_used_rows() {
    let open = [Category::Ones, Category::Twos, Category::FullHouse];
    assert_eq!(
        best_category(&dice([2, 2, 2, 5, 5]), &open),
        Some((Category::FullHouse, 25))
    );
    assert_eq!(
        best_category(&dice([3, 3, 4, 5, 6]), &open),
        Some((Category::Ones, 0))
    );
    assert_eq!(best_category(&dice([3, 3, 4, 5, 6]), &[]), None);
}

fn quiet(seed: u64, players: usize) -> AutoplayConfig {
    AutoplayConfig {
        seed,
        players,
        game: GameConfig {
            bonus_event: BonusEventConfig {
                spawn_chance: 0.0,
                ..BonusEventConfig::default()
            },
            ..GameConfig::default()
        },
        ..AutoplayConfig::default()
    }
}

fn assert_consistent(result: &AutoplayResult, players: usize) {
    assert_eq!(result.players.len(), players);
    assert_eq!(result.turns.len(), 13 * players);
    assert_eq!(result.standings.totals.len(), players);
    assert!(!result.standings.winners.is_empty());
    for totals in &result.standings.totals {
        assert!(totals.grand_total <= result.standings.top_score);
        assert!((-40..=40).contains(&totals.wager));
    }
    for player in 0..players {
        let mut used: Vec<Category> = result
            .turns
            .iter()
            .filter(|turn| turn.player == player)
            .map(|turn| turn.category)
            .collect();
        used.sort();
        used.dedup();
        assert_eq!(used.len(), 13);
        let doubled = result
            .turns
            .iter()
            .filter(|turn| turn.player == player && turn.score.doubled)
            .count();
        assert!(doubled <= 1);
    }
}

#[test]
fn seeded_game_is_reproducible() {
    let first = run_autoplay(&quiet(7, 2)).expect("first");
    let second = run_autoplay(&quiet(7, 2)).expect("second");
    assert_consistent(&first, 2);
    assert_eq!(first.standings, second.standings);
    assert_eq!(first.turns, second.turns);
    assert_eq!(first.players, vec!["Bot 1".to_string(), "Bot 2".to_string()]);
}

#[test]
fn games_for_each_table_size() {
    for players in 1..=4 {
        let result = run_autoplay(&quiet(100 + players as u64, players)).expect("game");
        assert_consistent(&result, players);
    }
}

#[test]
fn eager_catcher_collects_every_token() {
    let config = AutoplayConfig {
        catch_chance: 1.0,
        game: GameConfig {
            bonus_event: BonusEventConfig {
                spawn_chance: 1.0,
                tick_ms: 60_000,
                ..BonusEventConfig::default()
            },
            ..GameConfig::default()
        },
        ..quiet(3, 1)
    };
    let result = run_autoplay(&config).expect("game");
    assert_eq!(result.summary.tokens_spawned, 13);
    assert_eq!(result.summary.tokens_caught, 13);
    for turn in &result.turns {
        assert_eq!(turn.token, Some(TokenState::Caught));
        assert_eq!(turn.score.catch_bonus, 10);
    }
}

#[test]
fn report_and_json_cover_the_game() {
    let result = run_autoplay(&quiet(11, 2)).expect("game");
    let report = result.to_text_report();
    assert!(report.contains("seed: 11"));
    assert!(report.contains("Bot 2"));
    let json = serde_json::to_string(&result).expect("json");
    let back: AutoplayResult = serde_json::from_str(&json).expect("parse");
    assert_eq!(back.standings, result.standings);
    assert_eq!(back.summary, result.summary);
}

#[test]
fn impossible_table_size_is_rejected() {
    assert!(run_autoplay(&quiet(1, 0)).is_err());
    assert!(run_autoplay(&quiet(1, 5)).is_err());
}
