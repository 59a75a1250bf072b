/*
 * Rendering the intersection into lamp states.
 *
 * The control logic should not have to think about flashing. Rather than
 * toggling the white call indicators from inside the sequencer, each output
 * gets a descriptor saying whether it is on and whether it is subject to the
 * flash clock. The descriptors are then masked with the clock in one pass,
 * the way a discrete-logic controller would AND a free-running timer bus
 * into its outputs.
 *
 * The flash clock is derived from the ticks spent in the current phase, so
 * rendering is a pure function of (phase, calls, elapsed ticks) and leaves no
 * state behind between ticks.
 */

use enum_ordinalize::Ordinalize;

use crate::timing::FLASH_PERIOD_TICKS;
use crate::trafficlight::Phase;
use crate::trafficlight::call::{Approach, CallFlags};

#[derive(Ordinalize, Debug, PartialEq, Eq, Clone, Copy)]
#[repr(usize)]
pub enum Pins {
    // Vehicle heads.
    NorthSouthRed,
    NorthSouthAmber,
    NorthSouthGreen,
    EastWestRed,
    EastWestAmber,
    EastWestGreen,

    // Pedestrian signals, named after the approach they walk alongside. The
    // white lamp is the call indicator.
    NorthSouthPedestrianRed,
    NorthSouthPedestrianGreen,
    NorthSouthPedestrianWhite,
    EastWestPedestrianRed,
    EastWestPedestrianGreen,
    EastWestPedestrianWhite,
}

impl Pins {
    fn vehicle(approach: Approach) -> [Pins; 3] {
        match approach {
            Approach::NorthSouth => [
                Pins::NorthSouthRed,
                Pins::NorthSouthAmber,
                Pins::NorthSouthGreen,
            ],
            Approach::EastWest => [Pins::EastWestRed, Pins::EastWestAmber, Pins::EastWestGreen],
        }
    }

    fn pedestrian(approach: Approach) -> [Pins; 3] {
        match approach {
            Approach::NorthSouth => [
                Pins::NorthSouthPedestrianRed,
                Pins::NorthSouthPedestrianGreen,
                Pins::NorthSouthPedestrianWhite,
            ],
            Approach::EastWest => [
                Pins::EastWestPedestrianRed,
                Pins::EastWestPedestrianGreen,
                Pins::EastWestPedestrianWhite,
            ],
        }
    }
}

/// The complete set of lamp states for one tick.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct OutputVector([bool; Pins::VARIANT_COUNT]);

impl OutputVector {
    pub fn is_on(&self, pin: Pins) -> bool {
        self.0[pin.ordinal()]
    }

    pub fn as_array(&self) -> &[bool; Pins::VARIANT_COUNT] {
        &self.0
    }

    /// Lit pins in ordinal order.
    pub fn lit(&self) -> impl Iterator<Item = Pins> + '_ {
        Pins::VARIANTS
            .iter()
            .copied()
            .filter(move |pin| self.is_on(*pin))
    }

    pub(crate) fn set(&mut self, pin: Pins, on: bool) {
        self.0[pin.ordinal()] = on;
    }
}

#[derive(Copy, Clone)]
struct OutputStateDescriptor {
    on: bool,
    subject_to_flash: bool,
}

impl OutputStateDescriptor {
    const fn new() -> Self {
        OutputStateDescriptor {
            on: false,
            subject_to_flash: false,
        }
    }
}

struct OutputMasker {
    output_descriptors: [OutputStateDescriptor; Pins::VARIANT_COUNT],
}

impl OutputMasker {
    const fn new() -> Self {
        OutputMasker {
            output_descriptors: [OutputStateDescriptor::new(); Pins::VARIANT_COUNT],
        }
    }

    fn set_on_off3(&mut self, pins: [Pins; 3], on: [bool; 3]) {
        for (pin, on) in pins.into_iter().zip(on) {
            self.set_pin(pin, on, false);
        }
    }

    fn set_pin(&mut self, pin: Pins, on: bool, subject_to_flash: bool) {
        self.output_descriptors[pin.ordinal()] = OutputStateDescriptor {
            on,
            subject_to_flash,
        }
    }

    fn mask_output_pins(&self, flash_on: bool) -> OutputVector {
        let mut outputs = OutputVector::default();
        for pin in Pins::VARIANTS.iter().copied() {
            let output_descriptor = &self.output_descriptors[pin.ordinal()];
            let mut on = output_descriptor.on;
            if output_descriptor.subject_to_flash {
                on &= flash_on;
            }
            outputs.set(pin, on);
        }
        outputs
    }
}

/// On for the first half of every flash period, counted from phase start.
pub fn flash_on(elapsed_ticks: u16) -> bool {
    elapsed_ticks % FLASH_PERIOD_TICKS < FLASH_PERIOD_TICKS / 2
}

pub fn render(phase: Phase, calls: &CallFlags, elapsed_ticks: u16) -> OutputVector {
    let mut masker = OutputMasker::new();
    let green = phase.green_approach();

    for approach in Approach::BOTH {
        let rag = phase.aspect(approach);
        masker.set_on_off3(Pins::vehicle(approach), [rag.red, rag.amber, rag.green]);

        let [red, walk, white] = Pins::pedestrian(approach);
        let walking = green == Some(approach);
        masker.set_pin(red, !walking, false);
        masker.set_pin(walk, walking, false);

        // Solid while the caller waits, flashing once their walk is showing.
        if calls.is_set(approach) {
            masker.set_pin(white, true, walking);
        }
    }

    masker.mask_output_pins(flash_on(elapsed_ticks))
}
