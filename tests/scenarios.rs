/*
 * Whole-intersection scenarios, driven tick by tick through the simulated
 * surface exactly as the firmware drives the GPIO surface.
 */

use intersection::timing::TICKS_PER_SECOND;
use intersection::{Approach, Intersection, Phase, Pins, SimulatedSurface, render};

struct Rig {
    intersection: Intersection,
    surface: SimulatedSurface,
    transitions: Vec<(u32, Phase)>,
    now: u32,
}

impl Rig {
    fn new() -> Self {
        let intersection = Intersection::new();
        let mut surface = SimulatedSurface::new();
        intersection.start(&mut surface);
        Rig {
            intersection,
            surface,
            transitions: Vec::new(),
            now: 0,
        }
    }

    fn tick(&mut self) -> Option<Phase> {
        self.now += 1;
        let entered = self.intersection.tick(&mut self.surface);
        if let Some(phase) = entered {
            self.transitions.push((self.now, phase));
        }
        entered
    }

    fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Ticks until the next transition, returning how many it took.
    fn run_to_next_phase(&mut self) -> u32 {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if self.tick().is_some() {
                return ticks;
            }
            assert!(ticks <= 1500, "phase {:?} never ended", self.intersection.phase());
        }
    }

    fn press_for_one_tick(&mut self, approach: Approach) -> Option<Phase> {
        self.surface.set_button(approach, true);
        let entered = self.tick();
        self.surface.set_button(approach, false);
        entered
    }

    fn run_until(&mut self, phase: Phase) {
        while self.intersection.phase() != phase {
            self.tick();
        }
    }
}

#[test]
fn first_half_cycle_without_calls_takes_22_seconds() {
    let mut rig = Rig::new();

    rig.run(1500);
    assert_eq!(rig.intersection.phase(), Phase::EastWestYield);
    assert_eq!(rig.intersection.elapsed_ticks(), 0);

    rig.run(200);
    assert_eq!(rig.intersection.phase(), Phase::ClearBeforeNorthSouth);
    rig.run(300);
    assert_eq!(rig.intersection.phase(), Phase::NorthSouthAttention);
    rig.run(200);
    assert_eq!(rig.intersection.phase(), Phase::NorthSouthGo);

    assert_eq!(rig.now, 22 * TICKS_PER_SECOND as u32);
    assert_eq!(
        rig.transitions,
        [
            (1500, Phase::EastWestYield),
            (1700, Phase::ClearBeforeNorthSouth),
            (2000, Phase::NorthSouthAttention),
            (2200, Phase::NorthSouthGo),
        ]
    );
}

#[test]
fn phases_cycle_in_order_regardless_of_calls() {
    let mut rig = Rig::new();
    let mut seen = vec![rig.intersection.phase()];
    for i in 0..40 {
        // Keep hammering both buttons on alternate phases.
        if i % 2 == 0 {
            rig.press_for_one_tick(Approach::NorthSouth);
            rig.press_for_one_tick(Approach::EastWest);
        }
        rig.run_to_next_phase();
        seen.push(rig.intersection.phase());
    }
    for pair in seen.windows(2) {
        assert_eq!(pair[0].next(), pair[1]);
    }
    assert_eq!(seen.iter().filter(|p| **p == Phase::NorthSouthGo).count(), 5);
}

#[test]
fn north_south_call_shortens_east_west_green() {
    let mut rig = Rig::new();
    rig.press_for_one_tick(Approach::NorthSouth);
    rig.run_to_next_phase();
    assert_eq!(rig.transitions, [(800, Phase::EastWestYield)]);
}

#[test]
fn east_west_green_runs_full_length_without_a_call() {
    let mut rig = Rig::new();
    assert_eq!(rig.run_to_next_phase(), 1500);
}

#[test]
fn east_west_call_at_start_of_north_south_green() {
    let mut rig = Rig::new();
    rig.run(2199);
    // The press lands on the tick that enters north-south green.
    assert_eq!(rig.press_for_one_tick(Approach::EastWest), Some(Phase::NorthSouthGo));
    assert_eq!(rig.intersection.elapsed_ticks(), 0);
    assert!(rig.intersection.calls().is_set(Approach::EastWest));

    assert_eq!(rig.run_to_next_phase(), 800);
    assert_eq!(rig.intersection.phase(), Phase::NorthSouthYield);
    assert!(!rig.intersection.calls().is_set(Approach::NorthSouth));
    // Still waiting: the east-west walk has not been shown yet.
    assert!(rig.intersection.calls().is_set(Approach::EastWest));
}

#[test]
fn north_south_call_is_cleared_when_its_green_ends() {
    let mut rig = Rig::new();
    rig.press_for_one_tick(Approach::NorthSouth);
    rig.run_until(Phase::NorthSouthGo);
    assert!(rig.intersection.calls().is_set(Approach::NorthSouth));

    rig.run_until(Phase::NorthSouthYield);
    assert!(!rig.intersection.calls().is_set(Approach::NorthSouth));
    rig.run(50);
    assert!(!rig.intersection.calls().is_set(Approach::NorthSouth));

    // A fresh press latches again.
    rig.press_for_one_tick(Approach::NorthSouth);
    assert!(rig.intersection.calls().is_set(Approach::NorthSouth));
}

#[test]
fn east_west_call_survives_until_east_west_green_ends() {
    let mut rig = Rig::new();
    rig.run_until(Phase::NorthSouthGo);
    rig.press_for_one_tick(Approach::EastWest);
    for phase in [
        Phase::NorthSouthYield,
        Phase::ClearBeforeEastWest,
        Phase::EastWestAttention,
        Phase::EastWestGo,
    ] {
        rig.run_until(phase);
        assert!(rig.intersection.calls().is_set(Approach::EastWest), "{:?}", phase);
    }
    rig.run_until(Phase::EastWestYield);
    assert!(!rig.intersection.calls().is_set(Approach::EastWest));
}

#[test]
fn waiting_pedestrian_sees_solid_then_flashing_white() {
    let mut rig = Rig::new();
    rig.press_for_one_tick(Approach::NorthSouth);

    // Blocked by east-west green: solid.
    for _ in 0..100 {
        rig.tick();
        assert!(rig.surface.outputs().is_on(Pins::NorthSouthPedestrianWhite));
    }

    // Walking: flashing at 1Hz from the start of the phase.
    rig.run_until(Phase::NorthSouthGo);
    let mut lit = 0;
    for _ in 0..100 {
        rig.tick();
        if rig.surface.outputs().is_on(Pins::NorthSouthPedestrianWhite) {
            lit += 1;
        }
        assert!(rig.surface.outputs().is_on(Pins::NorthSouthPedestrianGreen));
    }
    assert_eq!(lit, 50);

    // Served: dark again.
    rig.run_until(Phase::NorthSouthYield);
    assert!(!rig.surface.outputs().is_on(Pins::NorthSouthPedestrianWhite));
}

#[test]
fn surface_always_holds_the_rendering_of_the_current_state() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.surface.outputs(),
        &render(Phase::EastWestGo, &rig.intersection.calls(), 0)
    );
    for i in 0..6000 {
        if i % 777 == 0 {
            rig.press_for_one_tick(Approach::EastWest);
        }
        rig.tick();
        assert_eq!(rig.surface.outputs(), &rig.intersection.outputs());
    }
    assert_eq!(rig.surface.writes(), rig.now + 1);
}
