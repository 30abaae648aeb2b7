// SPDX-License-Identifier: MIT OR Apache-2.0

use rand::rngs::StdRng;
use rand::SeedableRng;

use hexplode_core::ai::{
    at_capacity, clear_of_enemy_triggers, AiLevel, Filter, Filtered, FirstSuccess, KeepIf,
    MaxFitness, RandomChoice, Strategy,
};
use hexplode_core::heuristics::{chain_potential, owned_pieces, positional_strength};
use hexplode_core::{Board, PlayerId, TriCoord};

#[test]
fn adjacent_trigger_cells_merge_into_one_cluster() {
    let mut board = Board::new(2);
    // capacity-1 edge cell and capacity-2 interior neighbor, both
    // full, both ours, nothing hostile anywhere near
    assert!(board.place(TriCoord::new(0, 2, false), 0));
    assert!(board.place(TriCoord::new(0, 2, true), 0));
    assert!(board.place(TriCoord::new(0, 2, true), 0));

    // 3 pieces in one unthreatened cluster: 3 * 3
    assert_eq!(chain_potential(&board, 0, 0), 9);
}

#[test]
fn enemy_trigger_poisons_the_whole_cluster() {
    let mut board = Board::new(2);
    assert!(board.place(TriCoord::new(0, 2, false), 0));
    assert!(board.place(TriCoord::new(0, 2, true), 0));
    assert!(board.place(TriCoord::new(0, 2, true), 0));
    // enemy trigger adjacent to our pair joins the same cluster
    assert!(board.place(TriCoord::new(1, 2, false), 1));
    assert!(board.place(TriCoord::new(1, 2, false), 1));

    // all 3 of our committed pieces become liabilities: -7 * 3
    assert_eq!(chain_potential(&board, 0, 0), -21);
}

#[test]
fn capturable_enemy_pieces_raise_cluster_value() {
    let mut board = Board::new(2);
    // our full edge cell, with a lone enemy piece sitting next to it
    assert!(board.place(TriCoord::new(0, 2, false), 0));
    assert!(board.place(TriCoord::new(0, 2, true), 1));

    // 3 * 1 owned + 2 * 1 threatened-by
    assert_eq!(chain_potential(&board, 0, 0), 5);
}

#[test]
fn pieces_out_of_trigger_reach_score_flat() {
    let mut board = Board::new(2);
    assert!(board.place(TriCoord::new(1, 1, false), 0));
    assert_eq!(chain_potential(&board, 0, 0), 1);
}

#[test]
fn empty_filter_falls_through_to_total_fallback() {
    let board = Board::new(1);
    let moves = board.legal_moves(0);
    let mut seed = StdRng::seed_from_u64(7);

    // nothing is at capacity on an empty board, so the first link
    // must yield and the uniform fallback must deliver
    let mut strategy = FirstSuccess::new(vec![
        Box::new(Filtered::new(
            KeepIf::new(at_capacity),
            RandomChoice::new(&mut seed),
        )),
        Box::new(RandomChoice::new(&mut seed)),
    ]);

    let chosen = strategy.choose(&board, &moves, 0);
    assert!(chosen.is_some());
    assert!(moves.contains(&chosen.unwrap()));
}

#[test]
fn strategies_yield_on_an_empty_move_list() {
    let board = Board::new(1);
    let mut seed = StdRng::seed_from_u64(7);
    let mut random = RandomChoice::new(&mut seed);
    assert_eq!(random.choose(&board, &[], 0), None);

    let mut chain = AiLevel::Chain.build(&mut seed);
    assert_eq!(chain.choose(&board, &[], 0), None);
}

#[test]
fn max_fitness_keeps_ties_in_enumeration_order() {
    let board = Board::new(1);
    let moves = board.legal_moves(0);
    let mut filter = MaxFitness::new(|_: &Board, _: PlayerId, _: u32| 0);
    assert_eq!(filter.apply(&board, &moves, 0), moves);
}

#[test]
fn greedy_detonation_prefers_the_capturing_trigger() {
    let mut board = Board::new(2);
    let capturing = TriCoord::new(0, 2, false);
    let quiet = TriCoord::new(3, 0, false);
    // both our edge cells are ready to fire; only one has enemy
    // pieces in blast range
    assert!(board.place(capturing, 0));
    assert!(board.place(quiet, 0));
    assert!(board.place(TriCoord::new(0, 2, true), 1));
    assert!(board.place(TriCoord::new(0, 2, true), 1));

    let mut seed = StdRng::seed_from_u64(11);
    let mut strategy = Filtered::new(
        KeepIf::new(at_capacity),
        Filtered::new(MaxFitness::new(owned_pieces), RandomChoice::new(&mut seed)),
    );
    let moves = board.legal_moves(0);
    assert_eq!(strategy.choose(&board, &moves, 0), Some(capturing));
}

#[test]
fn trigger_gate_blocks_quiet_moves_entirely() {
    let mut board = Board::new(2);
    assert!(board.place(TriCoord::new(1, 1, false), 0));

    let mut gate = KeepIf::new(at_capacity);
    let moves = board.legal_moves(0);
    assert!(
        gate.apply(&board, &moves, 0).is_empty(),
        "no cell is one piece from exploding yet"
    );
}

#[test]
fn enemy_trigger_avoidance_filters_adjacent_cells() {
    let mut board = Board::new(2);
    let enemy_trigger = TriCoord::new(0, 2, false);
    assert!(board.place(enemy_trigger, 1));

    let moves = board.legal_moves(0);
    let mut filter = KeepIf::new(clear_of_enemy_triggers);
    let kept = filter.apply(&board, &moves, 0);
    assert!(!kept.is_empty());
    for c in &kept {
        assert!(
            !c.neighbors().contains(&enemy_trigger),
            "{c:?} still borders the enemy trigger"
        );
    }
}

#[test]
fn positional_strength_rewards_winning_outright() {
    let mut board = Board::new(2);
    assert!(board.place(TriCoord::new(1, 1, false), 0));
    assert!(board.place(TriCoord::new(1, 1, false), 0));
    assert_eq!(positional_strength(&board, 0, 0), i32::MAX);
    assert!(positional_strength(&board, 1, 0) < i32::MAX);
}

#[test]
fn positional_strength_penalizes_exposed_pieces() {
    let mut safe = Board::new(2);
    assert!(safe.place(TriCoord::new(1, 1, false), 0));
    assert!(safe.place(TriCoord::new(3, 0, false), 1));
    let baseline = positional_strength(&safe, 0, 0);

    let mut exposed = Board::new(2);
    assert!(exposed.place(TriCoord::new(1, 1, false), 0));
    // full enemy edge cell right next to our piece
    assert!(exposed.place(TriCoord::new(0, 1, true), 1));
    assert!(positional_strength(&exposed, 0, 0) < baseline);
}

#[test]
fn seeded_strategies_are_reproducible() {
    let board = Board::new(2);
    let moves = board.legal_moves(0);

    let mut first = RandomChoice::new(&mut StdRng::seed_from_u64(99));
    let mut second = RandomChoice::new(&mut StdRng::seed_from_u64(99));
    for _ in 0..20 {
        assert_eq!(
            first.choose(&board, &moves, 0),
            second.choose(&board, &moves, 0)
        );
    }
}

#[test]
fn every_level_produces_an_opening_move() {
    for level in [
        AiLevel::Random,
        AiLevel::Greedy,
        AiLevel::Positional,
        AiLevel::Chain,
    ] {
        let mut seed = StdRng::seed_from_u64(3);
        let mut strategy = level.build(&mut seed);
        let board = Board::new(2);
        let moves = board.legal_moves(0);
        let chosen = strategy.choose(&board, &moves, 0);
        assert!(chosen.is_some(), "{level:?} failed to open");
        assert!(moves.contains(&chosen.unwrap()));
    }
}
