pub mod call;
use call::{Approach, CallFlags};

use crate::timing::{
    ALL_RED_TICKS, AMBER_TICKS, GREEN_SHORT_TICKS, GREEN_TICKS, RED_AMBER_TICKS,
};

/*
 * The eight phases of the intersection. Each one fixes the aspect of both
 * vehicle heads at once; the cycle always runs in declaration order.
 */
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Phase {
    EastWestGo,
    EastWestYield,
    ClearBeforeNorthSouth,
    NorthSouthAttention,
    NorthSouthGo,
    NorthSouthYield,
    ClearBeforeEastWest,
    EastWestAttention,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Rag {
    pub red: bool,
    pub amber: bool,
    pub green: bool,
}

impl Rag {
    pub const RED: Rag = Rag::new(true, false, false);
    pub const RED_AMBER: Rag = Rag::new(true, true, false);
    pub const GREEN: Rag = Rag::new(false, false, true);
    pub const AMBER: Rag = Rag::new(false, true, false);

    pub const fn new(red: bool, amber: bool, green: bool) -> Self {
        Self { red, amber, green }
    }
}

impl Phase {
    pub const CYCLE: [Phase; 8] = [
        Phase::EastWestGo,
        Phase::EastWestYield,
        Phase::ClearBeforeNorthSouth,
        Phase::NorthSouthAttention,
        Phase::NorthSouthGo,
        Phase::NorthSouthYield,
        Phase::ClearBeforeEastWest,
        Phase::EastWestAttention,
    ];

    pub fn next(self) -> Phase {
        match self {
            Phase::EastWestGo => Phase::EastWestYield,
            Phase::EastWestYield => Phase::ClearBeforeNorthSouth,
            Phase::ClearBeforeNorthSouth => Phase::NorthSouthAttention,
            Phase::NorthSouthAttention => Phase::NorthSouthGo,
            Phase::NorthSouthGo => Phase::NorthSouthYield,
            Phase::NorthSouthYield => Phase::ClearBeforeEastWest,
            Phase::ClearBeforeEastWest => Phase::EastWestAttention,
            Phase::EastWestAttention => Phase::EastWestGo,
        }
    }

    pub fn north_south(self) -> Rag {
        match self {
            Phase::NorthSouthAttention => Rag::RED_AMBER,
            Phase::NorthSouthGo => Rag::GREEN,
            Phase::NorthSouthYield => Rag::AMBER,
            Phase::EastWestGo
            | Phase::EastWestYield
            | Phase::ClearBeforeNorthSouth
            | Phase::ClearBeforeEastWest
            | Phase::EastWestAttention => Rag::RED,
        }
    }

    pub fn east_west(self) -> Rag {
        match self {
            Phase::EastWestGo => Rag::GREEN,
            Phase::EastWestYield => Rag::AMBER,
            Phase::EastWestAttention => Rag::RED_AMBER,
            Phase::ClearBeforeNorthSouth
            | Phase::NorthSouthAttention
            | Phase::NorthSouthGo
            | Phase::NorthSouthYield
            | Phase::ClearBeforeEastWest => Rag::RED,
        }
    }

    pub fn aspect(self, approach: Approach) -> Rag {
        match approach {
            Approach::NorthSouth => self.north_south(),
            Approach::EastWest => self.east_west(),
        }
    }

    /// The approach whose vehicles, and parallel pedestrians, may go.
    pub fn green_approach(self) -> Option<Approach> {
        match self {
            Phase::EastWestGo => Some(Approach::EastWest),
            Phase::NorthSouthGo => Some(Approach::NorthSouth),
            _ => None,
        }
    }

    /*
     * A green is cut short when pedestrians are waiting on the approach it
     * blocks. Nothing ever extends a phase.
     */
    pub fn duration_ticks(self, calls: &CallFlags) -> u16 {
        match self {
            Phase::EastWestGo => green_ticks(calls, Approach::NorthSouth),
            Phase::NorthSouthGo => green_ticks(calls, Approach::EastWest),
            Phase::EastWestYield | Phase::NorthSouthYield => AMBER_TICKS,
            Phase::ClearBeforeNorthSouth | Phase::ClearBeforeEastWest => ALL_RED_TICKS,
            Phase::NorthSouthAttention | Phase::EastWestAttention => RED_AMBER_TICKS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::EastWestGo => "NS red / EW green",
            Phase::EastWestYield => "NS red / EW amber",
            Phase::ClearBeforeNorthSouth => "all red (to NS)",
            Phase::NorthSouthAttention => "NS red+amber / EW red",
            Phase::NorthSouthGo => "NS green / EW red",
            Phase::NorthSouthYield => "NS amber / EW red",
            Phase::ClearBeforeEastWest => "all red (to EW)",
            Phase::EastWestAttention => "NS red / EW red+amber",
        }
    }
}

fn green_ticks(calls: &CallFlags, blocked: Approach) -> u16 {
    if calls.is_set(blocked) {
        GREEN_SHORT_TICKS
    } else {
        GREEN_TICKS
    }
}

#[derive(Debug)]
pub struct TrafficLight {
    phase: Phase,
    elapsed_ticks: u16,
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficLight {
    pub const fn new() -> Self {
        TrafficLight {
            phase: Phase::EastWestGo,
            elapsed_ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed_ticks(&self) -> u16 {
        self.elapsed_ticks
    }

    pub(crate) fn count_tick(&mut self) {
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
    }

    /*
     * Move to the next phase once the current one has run its course. The
     * approach losing green has had its walk, so its call is consumed here
     * and nowhere else.
     */
    pub(crate) fn evaluate(&mut self, calls: &mut CallFlags) -> Option<Phase> {
        if self.elapsed_ticks < self.phase.duration_ticks(calls) {
            return None;
        }

        if let Some(served) = self.phase.green_approach() {
            calls.clear(served);
        }

        let from = self.phase;
        self.phase = from.next();
        self.elapsed_ticks = 0;
        info!("phase {} -> {}", from, self.phase);

        Some(self.phase)
    }

    #[cfg(test)]
    pub(crate) fn at(phase: Phase, elapsed_ticks: u16) -> Self {
        TrafficLight {
            phase,
            elapsed_ticks,
        }
    }
}
