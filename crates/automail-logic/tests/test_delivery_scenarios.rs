//! Scenario tests for allocation and the robot state machine working together.
//!
//! Each test drives a small fleet tick by tick through the public API and
//! checks positions, slots, and states at the interesting moments.

use automail_logic::building::Building;
use automail_logic::delivery::{delivery_score, DeliveryLedger};
use automail_logic::fleet::Automail;
use automail_logic::generator::MailGenerator;
use automail_logic::item::Item;
use automail_logic::pool::{AllocationMode, Pool};
use automail_logic::robot::{Robot, RobotKind, RobotState, Roster};
use automail_logic::simulation::Simulation;

// ── Helpers ────────────────────────────────────────────────────────────

fn ground_floor_building() -> Building {
    Building::new(10, 0, 0)
}

fn normal(id: u64, destination: i32) -> Item {
    Item::new(id, destination, 10, false, 0)
}

fn fragile(id: u64, destination: i32) -> Item {
    Item::new(id, destination, 10, true, 0)
}

fn hand_id(robot: &Robot) -> Option<u64> {
    robot.hand().map(Item::id)
}

// ── Basic robot, two items ─────────────────────────────────────────────

#[test]
fn single_allocation_fills_hand_and_tube() {
    let building = ground_floor_building();
    let mut robots = vec![Robot::new(0, RobotKind::Basic, &building)];
    let mut pool = Pool::new(AllocationMode::Simple);
    let mut ledger = DeliveryLedger::new();

    // First step registers the robot.
    robots[0]
        .step(0, Roster::empty(), &mut pool, &mut ledger)
        .unwrap();
    pool.add_item(normal(0, 3));
    pool.add_item(normal(1, 5));

    pool.allocate_step(&mut robots).unwrap();
    assert_eq!(hand_id(&robots[0]), Some(0));
    assert_eq!(robots[0].tube().map(Item::id), Some(1));
    assert!(robots[0].is_dispatched());
    assert_eq!(pool.idle_robots().count(), 0);
}

#[test]
fn basic_robot_round_trip() {
    let building = ground_floor_building();
    let mut automail = Automail::new(1, RobotKind::Basic, AllocationMode::Simple, &building);
    let mut ledger = DeliveryLedger::new();

    automail.tick(1, &mut ledger).unwrap();
    automail.pool_mut().add_item(normal(0, 3));
    automail.pool_mut().add_item(normal(1, 5));

    automail.tick(2, &mut ledger).unwrap();
    let robot = &automail.robots()[0];
    assert_eq!(robot.state(), RobotState::Delivering);
    assert_eq!(robot.destination_floor(), 3);
    assert_eq!(robot.current_floor(), 0);

    for now in 3..=5 {
        automail.tick(now, &mut ledger).unwrap();
    }
    assert_eq!(automail.robots()[0].current_floor(), 3);

    automail.tick(6, &mut ledger).unwrap();
    let robot = &automail.robots()[0];
    assert!(ledger.is_delivered(0));
    assert_eq!(hand_id(robot), Some(1));
    assert!(robot.tube().is_none());
    assert_eq!(robot.destination_floor(), 5);
    assert_eq!(robot.state(), RobotState::Delivering);

    for now in 7..=9 {
        automail.tick(now, &mut ledger).unwrap();
    }
    assert!(ledger.is_delivered(1));
    assert_eq!(automail.robots()[0].state(), RobotState::Returning);

    for now in 10..=14 {
        automail.tick(now, &mut ledger).unwrap();
    }
    assert_eq!(automail.robots()[0].current_floor(), 0);
    automail.tick(15, &mut ledger).unwrap();
    assert_eq!(automail.robots()[0].state(), RobotState::Waiting);
    assert_eq!(automail.pool().idle_robots().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn scripted_run_reports_time_and_score() {
    let building = ground_floor_building();
    let generator = MailGenerator::from_items(vec![normal(0, 3), normal(1, 5)]);
    let automail = Automail::new(1, RobotKind::Basic, AllocationMode::Simple, &building);
    let mut sim = Simulation::with_parts(building, generator, automail);

    let report = sim.run().unwrap();
    assert_eq!(report.delivered, 2);
    // Delivered on ticks 6 and 9; the clock has moved past the last tick.
    assert_eq!(report.final_time, 10);
    let expected = delivery_score(&normal(0, 3), 6) + delivery_score(&normal(1, 5), 9);
    assert!((report.score - expected).abs() < 1e-9);
    assert_eq!(report.statistics.totals.normal_delivered, 2);
    assert_eq!(report.statistics.totals.normal_weight, 20);
}

// ── Caution robot with fragile mail ────────────────────────────────────

#[test]
fn caution_robot_wraps_for_two_ticks() {
    let building = ground_floor_building();
    let mut automail = Automail::new(1, RobotKind::Caution, AllocationMode::Caution, &building);
    let mut ledger = DeliveryLedger::new();
    automail.tick(1, &mut ledger).unwrap();

    automail.pool_mut().add_item(fragile(0, 4));
    automail.pool_mut().add_item(normal(1, 2));

    automail.tick(2, &mut ledger).unwrap();
    let robot = &automail.robots()[0];
    assert_eq!(robot.special_hand().map(Item::id), Some(0));
    assert_eq!(hand_id(robot), Some(1));
    assert!(robot.tube().is_none());
    assert_eq!(robot.state(), RobotState::Wrapping);
    assert_eq!(robot.destination_floor(), 4);

    automail.tick(3, &mut ledger).unwrap();
    assert_eq!(automail.robots()[0].state(), RobotState::Wrapping);
    automail.tick(4, &mut ledger).unwrap();
    assert_eq!(automail.robots()[0].state(), RobotState::Delivering);
    assert_eq!(automail.robots()[0].current_floor(), 0);
}

#[test]
fn fragile_destination_served_before_hand() {
    let building = ground_floor_building();
    let generator = MailGenerator::from_items(vec![fragile(0, 4), normal(1, 2)]);
    let automail = Automail::new(1, RobotKind::Caution, AllocationMode::Caution, &building);
    let mut sim = Simulation::with_parts(building, generator, automail);

    // Register (1), load + wrap (2), wrap (3, 4), climb to 4 (5..8),
    // arrive and start unwrapping (9), hand over (10), descend to 2 (11, 12),
    // drop (13). The clock reads 11 once tick 10 is done.
    while !sim.ledger().is_delivered(0) {
        sim.tick().unwrap();
    }
    assert_eq!(sim.now(), 11);
    assert!(!sim.ledger().is_delivered(1));

    let report = sim.run().unwrap();
    assert_eq!(report.final_time, 14);
    let totals = report.statistics.totals;
    assert_eq!(totals.caution_delivered, 1);
    assert_eq!(totals.normal_delivered, 1);
    assert_eq!(totals.wrap_unwrap_time, 3);
}

// ── Adjacency freeze ───────────────────────────────────────────────────

#[test]
fn neighbour_freezes_while_fragile_item_is_unwrapped() {
    let building = ground_floor_building();
    let mut automail = Automail::new(2, RobotKind::Caution, AllocationMode::Caution, &building);
    let mut ledger = DeliveryLedger::new();

    automail.tick(1, &mut ledger).unwrap();

    // Robot 0 takes the fragile item and starts wrapping.
    automail.pool_mut().add_item(fragile(0, 2));
    automail.tick(2, &mut ledger).unwrap();
    assert_eq!(automail.robots()[0].state(), RobotState::Wrapping);
    automail.tick(3, &mut ledger).unwrap();
    automail.tick(4, &mut ledger).unwrap();
    assert_eq!(automail.robots()[0].state(), RobotState::Delivering);

    // Robot 1 leaves three ticks behind.
    automail.pool_mut().add_item(normal(1, 6));
    automail.tick(5, &mut ledger).unwrap();
    assert_eq!(automail.robots()[1].state(), RobotState::Delivering);

    automail.tick(6, &mut ledger).unwrap();
    let robots = automail.robots();
    assert_eq!(robots[0].current_floor(), 2);
    assert!(robots[0].is_handling_fragile());
    assert_eq!(robots[1].current_floor(), 1);

    // Robot 0 starts unwrapping; robot 1, one floor below, holds.
    automail.tick(7, &mut ledger).unwrap();
    let robots = automail.robots();
    assert_eq!(robots[0].state(), RobotState::Unwrapping);
    assert_eq!(robots[1].current_floor(), 1);

    // Fragile item handed over; robot 1 moves again.
    automail.tick(8, &mut ledger).unwrap();
    let robots = automail.robots();
    assert!(ledger.is_delivered(0));
    assert_eq!(robots[0].state(), RobotState::Returning);
    assert_eq!(robots[1].current_floor(), 2);

    automail.tick(9, &mut ledger).unwrap();
    assert_eq!(automail.robots()[1].current_floor(), 3);
    assert_eq!(automail.robots()[0].current_floor(), 1);
}

#[test]
fn basic_robots_share_floors_without_freezing() {
    let building = ground_floor_building();
    let mut automail = Automail::new(2, RobotKind::Basic, AllocationMode::Simple, &building);
    let mut ledger = DeliveryLedger::new();
    automail.tick(1, &mut ledger).unwrap();
    automail.pool_mut().add_item(normal(0, 1));
    automail.pool_mut().add_item(normal(1, 4));
    automail.pool_mut().add_item(normal(2, 4));

    // Robot 0 carries items 0 and 1, robot 1 carries item 2.
    for now in 2..=6 {
        automail.tick(now, &mut ledger).unwrap();
    }
    let robots = automail.robots();
    assert!(ledger.is_delivered(0));
    assert_eq!(robots[0].current_floor(), 3);
    assert_eq!(robots[1].current_floor(), 4);

    automail.tick(7, &mut ledger).unwrap();
    assert!(ledger.is_delivered(2));
    assert_eq!(automail.robots()[0].current_floor(), 4);
    assert_eq!(automail.robots()[1].state(), RobotState::Returning);
}
