/*
 * The I/O module for the intersection.
 *
 * This is the only device-specific part of the program. It owns the GPIO
 * pins behind a `HardwareSurface` and runs a reporter task that prints every
 * phase change on the serial port, so the control loop itself never waits
 * on the UART.
 */

use embassy_stm32::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pin, Pull, Speed},
    mode::Async,
    peripherals,
    usart::{self, Config, Uart},
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Receiver};
use enum_ordinalize::Ordinalize;
use intersection::{Buttons, HardwareSurface, OutputVector, Phase, Pins};

pub const CHANNEL_CAPACITY: usize = 4;

pub struct GpioSurface<'d> {
    outputs: [Output<'d>; Pins::VARIANT_COUNT],
    north_south_button: Input<'d>,
    east_west_button: Input<'d>,
}

/*
 * Claim the pins and the serial port. The pin map is fixed by the board:
 * the first six outputs drive the vehicle heads, the next six the
 * pedestrian signals.
 */
pub fn init(p: embassy_stm32::Peripherals) -> (GpioSurface<'static>, Uart<'static, Async>) {
    // Ordered as `Pins`.
    let outputs: [Output; Pins::VARIANT_COUNT] = [
        Output::new(p.PE1.degrade(), Level::Low, Speed::Low),
        Output::new(p.PB9.degrade(), Level::Low, Speed::Low),
        Output::new(p.PB7.degrade(), Level::Low, Speed::Low),
        Output::new(p.PB6.degrade(), Level::Low, Speed::Low),
        Output::new(p.PB8.degrade(), Level::Low, Speed::Low),
        Output::new(p.PE0.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD0.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD1.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD2.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD3.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD4.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD5.degrade(), Level::Low, Speed::Low),
    ];

    // The buttons pull the line high when pressed.
    let north_south_button = Input::new(p.PC0.degrade(), Pull::Down);
    let east_west_button = Input::new(p.PC1.degrade(), Pull::Down);

    bind_interrupts!(struct Irqs {
        USART1 => usart::InterruptHandler<peripherals::USART1>;
    });
    let usart = Uart::new(
        p.USART1,
        p.PA10,
        p.PA9,
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH5,
        Config::default(), // 115200 baud
    )
    .unwrap();

    (
        GpioSurface {
            outputs,
            north_south_button,
            east_west_button,
        },
        usart,
    )
}

impl HardwareSurface for GpioSurface<'_> {
    fn read_inputs(&mut self) -> Buttons {
        Buttons::new(
            self.north_south_button.is_high(),
            self.east_west_button.is_high(),
        )
    }

    fn write_outputs(&mut self, outputs: &OutputVector) {
        for (output, on) in self.outputs.iter_mut().zip(outputs.as_array()) {
            light(output, *on);
        }
    }
}

fn light(output: &mut Output, on: bool) {
    output.set_level(if on { Level::High } else { Level::Low });
}

#[embassy_executor::task]
pub async fn report_task(
    mut usart: Uart<'static, Async>,
    phases: Receiver<'static, ThreadModeRawMutex, Phase, CHANNEL_CAPACITY>,
) -> ! {
    loop {
        let phase = phases.receive().await;
        for part in [b"phase: ".as_slice(), phase.name().as_bytes(), b"\n".as_slice()] {
            if let Err(e) = usart.write(part).await {
                defmt::warn!("serial report failed: {}", e);
                break;
            }
        }
    }
}
