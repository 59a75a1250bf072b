/*
 * The tick handler. One call to `tick` is one period of the 100Hz control
 * loop and always runs the same four steps, in this order:
 *
 *   1. count the tick,
 *   2. sample the buttons and latch any calls,
 *   3. let the sequencer move on if the phase has run its course,
 *   4. render every output from scratch and write it out.
 *
 * A press seen on a tick can therefore end a green on that very tick, and
 * what gets written always reflects the state at the end of the tick.
 */

use crate::output_masker::{OutputVector, render};
use crate::surface::HardwareSurface;
use crate::trafficlight::call::CallFlags;
use crate::trafficlight::{Phase, TrafficLight};

#[derive(Debug, Default)]
pub struct Intersection {
    trafficlight: TrafficLight,
    calls: CallFlags,
}

impl Intersection {
    pub const fn new() -> Self {
        Intersection {
            trafficlight: TrafficLight::new(),
            calls: CallFlags::none(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.trafficlight.phase()
    }

    pub fn elapsed_ticks(&self) -> u16 {
        self.trafficlight.elapsed_ticks()
    }

    pub fn calls(&self) -> CallFlags {
        self.calls
    }

    pub fn outputs(&self) -> OutputVector {
        render(self.phase(), &self.calls, self.elapsed_ticks())
    }

    /*
     * Show the starting picture before the first tick arrives, so the lamps
     * are never dark while the timer spins up.
     */
    pub fn start<S: HardwareSurface>(&self, surface: &mut S) {
        info!("starting in phase {}", self.phase());
        surface.write_outputs(&self.outputs());
    }

    /// Returns the phase just entered, if this tick caused a transition.
    pub fn tick<S: HardwareSurface>(&mut self, surface: &mut S) -> Option<Phase> {
        self.trafficlight.count_tick();
        self.calls.latch(surface.read_inputs());
        let entered = self.trafficlight.evaluate(&mut self.calls);
        surface.write_outputs(&self.outputs());
        entered
    }

    #[cfg(test)]
    pub(crate) fn at(phase: Phase, calls: CallFlags) -> Self {
        Intersection {
            trafficlight: TrafficLight::at(phase, 0),
            calls,
        }
    }
}
