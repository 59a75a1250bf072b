/*
 * Compile-time timing of the intersection. All durations are counted in
 * ticks of the 100Hz control loop.
 */

pub const TICKS_PER_SECOND: u16 = 100;

const fn seconds(s: u16) -> u16 {
    s * TICKS_PER_SECOND
}

/// Green when nobody is waiting on the blocked approach.
pub const GREEN_TICKS: u16 = seconds(15);
/// Green cut short by a pending pedestrian call.
pub const GREEN_SHORT_TICKS: u16 = seconds(8);
pub const AMBER_TICKS: u16 = seconds(2);
pub const ALL_RED_TICKS: u16 = seconds(3);
pub const RED_AMBER_TICKS: u16 = seconds(2);

// The white call indicator flashes at 1Hz: on for the first half of every
// period, counted from the start of the phase.
pub const FLASH_PERIOD_TICKS: u16 = 50;
