#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

/*
 * On the device this is the controller firmware: a 100Hz ticker drives the
 * intersection against the GPIO pins. Built for the host it is a simulator
 * that drives the same core against scripted button presses.
 */

#[cfg(target_os = "none")]
mod io;

#[cfg(target_os = "none")]
mod firmware {
    use defmt_rtt as _;
    use panic_halt as _;

    use embassy_executor::Spawner;
    use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
    use embassy_time::{Duration, Ticker};
    use intersection::Intersection;
    use intersection::timing::TICKS_PER_SECOND;

    use crate::io::{self, CHANNEL_CAPACITY, report_task};

    static PHASES: Channel<ThreadModeRawMutex, intersection::Phase, CHANNEL_CAPACITY> =
        Channel::new();

    #[embassy_executor::main]
    async fn main(spawner: Spawner) {
        let peripherals = embassy_stm32::init(Default::default());
        let (mut surface, usart) = io::init(peripherals);

        spawner
            .spawn(report_task(usart, PHASES.receiver()))
            .unwrap();

        let mut intersection = Intersection::new();
        intersection.start(&mut surface);
        let _ = PHASES.try_send(intersection.phase());

        // Each tick runs to completion before the next one is awaited, so
        // the controller state is never touched re-entrantly.
        let mut ticker = Ticker::every(Duration::from_hz(TICKS_PER_SECOND as u64));
        loop {
            ticker.next().await;
            if let Some(phase) = intersection.tick(&mut surface) {
                if PHASES.try_send(phase).is_err() {
                    defmt::warn!("report queue full, dropped {}", phase);
                }
            }
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    use intersection::timing::TICKS_PER_SECOND;
    use intersection::{Approach, Intersection, Pins, SimulatedSurface};

    // (tick, approach) pairs; each press is held for a single tick.
    const PRESSES: [(u32, Approach); 3] = [
        (300, Approach::NorthSouth),
        (2500, Approach::EastWest),
        (5200, Approach::NorthSouth),
    ];
    const TICKS: u32 = 3 * 4400;

    let mut intersection = Intersection::new();
    let mut surface = SimulatedSurface::new();
    intersection.start(&mut surface);
    println!("{:>7}  phase: {}", "0.00s", intersection.phase().name());

    for now in 1..=TICKS {
        let press = PRESSES.iter().find(|(at, _)| *at == now);
        if let Some((_, approach)) = press {
            surface.set_button(*approach, true);
            println!("{:>6.2}s  button: {:?}", seconds(now, TICKS_PER_SECOND), approach);
        }

        if let Some(phase) = intersection.tick(&mut surface) {
            let waiting: Vec<_> = [Pins::NorthSouthPedestrianWhite, Pins::EastWestPedestrianWhite]
                .into_iter()
                .filter(|pin| surface.outputs().is_on(*pin))
                .collect();
            println!(
                "{:>6.2}s  phase: {} {:?}",
                seconds(now, TICKS_PER_SECOND),
                phase.name(),
                waiting
            );
        }
        surface.release_all();
    }
}

#[cfg(not(target_os = "none"))]
fn seconds(ticks: u32, ticks_per_second: u16) -> f64 {
    f64::from(ticks) / f64::from(ticks_per_second)
}
