use ghost_engine::constants::house;
use ghost_engine::error::MazeError;
use ghost_engine::map::direction::Direction;
use ghost_engine::map::maze::TraversalFlags;
use ghost_engine::map::tile::TileIndex;
use ghost_engine::movement::controller::{HouseArbitration, TargetingMode};
use ghost_engine::movement::selection::{select_direction, Decision};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

use common::{create_test_maze, free_house, TestMap};

const TILE: TileIndex = TileIndex::new(5, 5);

fn decision(travel: Direction, target: TileIndex) -> Decision {
    Decision {
        tile: TILE,
        travel: Some(travel),
        mode: TargetingMode::Target(target),
        flags: TraversalFlags::GHOST,
        force_reverse: false,
        house: free_house(),
    }
}

fn select(map: &TestMap, decision: &Decision) -> Result<Direction, MazeError> {
    select_direction(map, decision, &mut SmallRng::seed_from_u64(7))
}

#[test]
fn test_equal_distances_resolve_by_priority() {
    let map = TestMap::new();
    // Every neighbor is one tile from the target
    assert_eq!(select(&map, &decision(Direction::Right, TILE)), Ok(Direction::Up));

    let map = TestMap::new().only_exits(TILE, &[Direction::Left, Direction::Down, Direction::Right]);
    assert_eq!(select(&map, &decision(Direction::Down, TILE)), Ok(Direction::Left));

    let map = TestMap::new().only_exits(TILE, &[Direction::Down, Direction::Right]);
    assert_eq!(select(&map, &decision(Direction::Right, TILE)), Ok(Direction::Down));
}

#[test]
fn test_closest_candidate_wins() {
    let map = TestMap::new();
    assert_eq!(
        select(&map, &decision(Direction::Up, TileIndex::new(5, 40))),
        Ok(Direction::Right)
    );
    assert_eq!(
        select(&map, &decision(Direction::Left, TileIndex::new(40, 5))),
        Ok(Direction::Down)
    );
}

#[test]
fn test_reverse_is_excluded_even_when_closest() {
    let map = TestMap::new();
    let behind = TileIndex::new(5, 0);

    let chosen = select(&map, &decision(Direction::Right, behind)).unwrap();
    assert_that(&chosen).is_not_equal_to(Direction::Left);
    assert_eq!(chosen, Direction::Up);
}

#[test]
fn test_dead_end_falls_back_to_reverse() {
    let map = TestMap::new().only_exits(TILE, &[Direction::Left]);
    assert_eq!(
        select(&map, &decision(Direction::Right, TileIndex::new(5, 40))),
        Ok(Direction::Left)
    );
}

#[test]
fn test_forced_reverse_wins_when_legal() {
    let map = TestMap::new();
    let mut forced = decision(Direction::Right, TileIndex::new(5, 40));
    forced.force_reverse = true;
    assert_eq!(select(&map, &forced), Ok(Direction::Left));
}

#[test]
fn test_illegal_forced_reverse_is_ignored() {
    let map = TestMap::new().only_exits(TILE, &[Direction::Up, Direction::Right]);
    let mut forced = decision(Direction::Right, TileIndex::new(5, 40));
    forced.force_reverse = true;
    assert_eq!(select(&map, &forced), Ok(Direction::Right));
}

#[test]
fn test_no_downward_exit_tile() {
    let map = TestMap::new().with_no_downward_exit(TILE);
    let below = TileIndex::new(100, 5);

    let mut blocked = decision(Direction::Left, below);
    assert_eq!(select(&map, &blocked), Ok(Direction::Left));

    blocked.house.may_enter = true;
    assert_eq!(select(&map, &blocked), Ok(Direction::Down));
}

#[test]
fn test_house_overrides_target() {
    let map = TestMap::new().with_house(&[TILE]);
    let house = HouseArbitration {
        rally: TileIndex::new(20, 5),
        exit: TileIndex::new(0, 5),
        ..HouseArbitration::default()
    };
    let far_right = TileIndex::new(5, 40);

    // Locked ghosts head for the rally point
    let mut locked = decision(Direction::Right, far_right);
    locked.house = HouseArbitration { locked: true, ..house };
    assert_eq!(select(&map, &locked), Ok(Direction::Down));

    // Free ghosts that may not stay head for the exit
    let mut leaving = decision(Direction::Right, far_right);
    leaving.house = house;
    assert_eq!(select(&map, &leaving), Ok(Direction::Up));

    // Ghosts allowed inside keep their own target
    let mut entering = decision(Direction::Right, far_right);
    entering.house = HouseArbitration { may_enter: true, ..house };
    assert_eq!(select(&map, &entering), Ok(Direction::Right));
}

#[test]
fn test_no_legal_move_is_an_error() {
    let map = TestMap::new().only_exits(TILE, &[]);
    assert_eq!(
        select(&map, &decision(Direction::Right, TILE)),
        Err(MazeError::NoLegalMove(TILE))
    );
}

#[test]
fn test_random_mode_only_picks_legal_non_reverse_moves() {
    let map = TestMap::new().only_exits(TILE, &[Direction::Up, Direction::Left, Direction::Right]);
    let mut random = decision(Direction::Right, TILE);
    random.mode = TargetingMode::Random;

    let mut rng = SmallRng::seed_from_u64(42);
    let mut seen = Vec::new();
    for _ in 0..200 {
        let chosen = select_direction(&map, &random, &mut rng).unwrap();
        assert_that(&[Direction::Up, Direction::Right].contains(&chosen)).is_true();
        if !seen.contains(&chosen) {
            seen.push(chosen);
        }
    }
    assert_that(&seen).has_length(2);
}

#[test]
fn test_random_mode_dead_end_reverses() {
    let map = TestMap::new().only_exits(TILE, &[Direction::Left]);
    let mut random = decision(Direction::Right, TILE);
    random.mode = TargetingMode::Random;
    assert_eq!(select(&map, &random), Ok(Direction::Left));
}

#[test]
fn test_standard_board_keeps_free_ghosts_out_of_the_house() {
    let maze = create_test_maze();
    let deep_below = TileIndex::new(30, 13);

    let leaving = Decision {
        tile: house::EXIT,
        travel: Some(Direction::Left),
        mode: TargetingMode::Target(deep_below),
        flags: TraversalFlags::GHOST,
        force_reverse: false,
        house: HouseArbitration::default(),
    };
    let chosen = select_direction(&maze, &leaving, &mut SmallRng::seed_from_u64(1)).unwrap();
    assert_that(&chosen).is_not_equal_to(Direction::Down);

    let entering = Decision {
        house: HouseArbitration {
            may_enter: true,
            ..HouseArbitration::default()
        },
        ..leaving
    };
    assert_eq!(
        select_direction(&maze, &entering, &mut SmallRng::seed_from_u64(1)),
        Ok(Direction::Down)
    );
}

#[test]
fn test_locked_ghosts_cannot_pass_the_door() {
    let maze = create_test_maze();
    let below_door = TileIndex::new(13, 13);

    let locked = Decision {
        tile: below_door,
        travel: Some(Direction::Down),
        mode: TargetingMode::Target(TileIndex::new(0, 13)),
        flags: HouseArbitration::locked().traversal_flags(),
        force_reverse: true,
        house: HouseArbitration::locked(),
    };
    let chosen = select_direction(&maze, &locked, &mut SmallRng::seed_from_u64(1)).unwrap();
    assert_that(&chosen).is_not_equal_to(Direction::Up);
}

#[test]
fn test_off_board_targets_still_pick_a_direction() {
    let maze = create_test_maze();
    let on_board = |tile: TileIndex, travel: Direction, target: TileIndex| Decision {
        tile,
        travel: Some(travel),
        mode: TargetingMode::Target(target),
        flags: TraversalFlags::GHOST,
        force_reverse: false,
        house: HouseArbitration::default(),
    };

    // Up and Left are equally far from the target, so priority decides
    let junction = on_board(TileIndex::new(5, 6), Direction::Left, TileIndex::new(-3, -2));
    assert_eq!(
        select_direction(&maze, &junction, &mut SmallRng::seed_from_u64(1)),
        Ok(Direction::Up)
    );

    // Up is a wall along the top corridor
    let top_row = on_board(TileIndex::new(1, 6), Direction::Right, TileIndex::new(-3, -3));
    assert_eq!(
        select_direction(&maze, &top_row, &mut SmallRng::seed_from_u64(1)),
        Ok(Direction::Down)
    );
}
