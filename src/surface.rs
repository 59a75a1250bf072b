/*
 * The boundary between the controller and whatever drives the lamps. The
 * core only ever sees a button sample and hands back a complete output
 * vector, so the same logic runs against GPIO on the device and against
 * `SimulatedSurface` on the host.
 */

use crate::output_masker::OutputVector;
use crate::trafficlight::call::Approach;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct Buttons {
    pub north_south: bool,
    pub east_west: bool,
}

impl Buttons {
    pub const fn new(north_south: bool, east_west: bool) -> Self {
        Self {
            north_south,
            east_west,
        }
    }

    pub fn pressed(&self, approach: Approach) -> bool {
        match approach {
            Approach::NorthSouth => self.north_south,
            Approach::EastWest => self.east_west,
        }
    }
}

pub trait HardwareSurface {
    /// Raw button levels for this tick; `true` means pressed. No debouncing
    /// or latching is expected from the implementation.
    fn read_inputs(&mut self) -> Buttons;

    /// Receives every output, lit or not, once per tick.
    fn write_outputs(&mut self, outputs: &OutputVector);
}

/*
 * In-memory back end for tests and the host simulator. Buttons stay at the
 * level they were set to until changed.
 */
#[derive(Debug, Default)]
pub struct SimulatedSurface {
    buttons: Buttons,
    outputs: OutputVector,
    writes: u32,
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, approach: Approach, pressed: bool) {
        match approach {
            Approach::NorthSouth => self.buttons.north_south = pressed,
            Approach::EastWest => self.buttons.east_west = pressed,
        }
    }

    pub fn release_all(&mut self) {
        self.buttons = Buttons::default();
    }

    pub fn outputs(&self) -> &OutputVector {
        &self.outputs
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HardwareSurface for SimulatedSurface {
    fn read_inputs(&mut self) -> Buttons {
        self.buttons
    }

    fn write_outputs(&mut self, outputs: &OutputVector) {
        self.outputs = *outputs;
        self.writes += 1;
    }
}
