/*
 * Hardware independent core of the intersection controller.
 *
 * Everything that decides what the lights show lives here: the phase
 * sequencer, the pedestrian call latch, the output renderer and the tick
 * handler that ties them together. The firmware binary only supplies a
 * `HardwareSurface` and a 100Hz tick, so the whole core runs on the host for
 * testing and simulation.
 */

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod intersection;
pub mod output_masker;
pub mod surface;
pub mod timing;
pub mod trafficlight;

pub use intersection::Intersection;
pub use output_masker::{OutputVector, Pins, render};
pub use surface::{Buttons, HardwareSurface, SimulatedSurface};
pub use trafficlight::call::{Approach, CallFlags};
pub use trafficlight::{Phase, Rag, TrafficLight};
