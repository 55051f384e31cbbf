#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

//! Arduino Mega 2560 wiring:
//!
//! - d2 (PE4) shift register data, d5 (PE3) shift clock, d13 (PB7) latch
//! - d38 (PD7) digit select, high = right digit
//! - d3 (PE5) IR receiver output, active low
//! - d22 (PA0) IR status LED
//! - d0/d1 USART0, 9600 8N1
//!
//! Timer0 overflow multiplexes the display, timer3 compare A samples the
//! IR line, USART0 receive complete queues bytes for the game.

#[cfg(target_arch = "avr")]
mod firmware {
    use core::cell::RefCell;

    use arduino_hal::prelude::*;
    use arduino_hal::hal::port::{PA0, PB7, PD7, PE0, PE1, PE3, PE4, PE5};
    use arduino_hal::port::mode::{Floating, Input, Output};
    use arduino_hal::port::Pin;
    use avr_device::interrupt;
    use embedded_hal::delay::DelayNs;
    use panic_halt as _;
    use ufmt::uWrite;
    #[cfg(feature = "diag")]
    use ufmt::uwriteln;

    use simon_seg::config::{BAUD_RATE, LCG_INITIAL_SEED, SAMPLE_CAPACITY, SAMPLE_TIMER_TOP};
    use simon_seg::{
        ByteQueue, DecodedFrame, DisplayValue, Game, IrReceiver, Jitter, Mailbox, Multiplexer,
        Platform, Receive, SequenceRng, SerialLink, Shared, Transmit,
    };
    #[cfg(feature = "diag")]
    use simon_seg::GameState;

    type DisplayMux = Multiplexer<Pin<Output, PE4>, Pin<Output, PE3>, Pin<Output, PB7>, Pin<Output, PD7>>;
    type Receiver = IrReceiver<Pin<Input<Floating>, PE5>, Pin<Output, PA0>, SAMPLE_CAPACITY>;
    type Serial = arduino_hal::hal::usart::Usart<
        arduino_hal::pac::USART0,
        Pin<Input, PE0>,
        Pin<Output, PE1>,
        arduino_hal::clock::MHz16,
    >;

    static DISPLAY: interrupt::Mutex<RefCell<Option<DisplayMux>>> =
        interrupt::Mutex::new(RefCell::new(None));
    static RECEIVER: interrupt::Mutex<RefCell<Option<Receiver>>> =
        interrupt::Mutex::new(RefCell::new(None));

    static DISPLAY_VALUE: Shared<DisplayValue> = Shared::new(DisplayValue::Blank);
    static JITTER: Jitter = Jitter::new();
    static IR_FRAMES: Mailbox<DecodedFrame> = Mailbox::new();
    static RX_BYTES: ByteQueue<16> = ByteQueue::new();

    #[avr_device::interrupt(atmega2560)]
    #[allow(non_snake_case)]
    fn TIMER0_OVF() {
        interrupt::free(|cs| {
            if let Some(mux) = DISPLAY.borrow(cs).borrow_mut().as_mut() {
                mux.tick(DISPLAY_VALUE.get());
            }
        });
        JITTER.churn();
    }

    #[avr_device::interrupt(atmega2560)]
    #[allow(non_snake_case)]
    fn TIMER3_COMPA() {
        let frame = interrupt::free(|cs| {
            RECEIVER
                .borrow(cs)
                .borrow_mut()
                .as_mut()
                .and_then(|receiver| receiver.tick())
        });
        if let Some(frame) = frame {
            IR_FRAMES.post(frame);
        }
    }

    #[avr_device::interrupt(atmega2560)]
    #[allow(non_snake_case)]
    fn USART0_RX() {
        let byte = unsafe { (*arduino_hal::pac::USART0::ptr()).udr0.read().bits() };
        RX_BYTES.push(byte);
    }

    fn multiplex_timer_init(tc0: arduino_hal::pac::TC0) {
        // Normal mode, clk/64, overflow interrupt.
        tc0.tccr0a.write(|w| unsafe { w.bits(0) });
        tc0.tccr0b.write(|w| unsafe { w.bits(0b011) });
        tc0.timsk0.write(|w| unsafe { w.bits(1 << 0) });
    }

    fn sample_timer_init(tc3: arduino_hal::pac::TC3) {
        // CTC on OCR3A (WGM32), clk/8 (CS31), compare A interrupt.
        tc3.tccr3a.write(|w| unsafe { w.bits(0) });
        tc3.tccr3b.write(|w| unsafe { w.bits((1 << 3) | (1 << 1)) });
        tc3.ocr3a.write(|w| unsafe { w.bits(SAMPLE_TIMER_TOP) });
        tc3.timsk3.write(|w| unsafe { w.bits(1 << 1) });
    }

    struct Console(Serial);

    impl Transmit for Console {
        type Error = core::convert::Infallible;

        fn try_transmit(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
            // WouldBlock until UDRE0 is set.
            self.0.write(byte)
        }
    }

    struct Board {
        link: SerialLink<Console>,
        delay: arduino_hal::Delay,
    }

    impl Board {
        fn service_ir(&mut self) {
            if let Some(frame) = IR_FRAMES.take() {
                #[cfg(feature = "diag")]
                {
                    let tag = if frame.is_complete() { "" } else { " short" };
                    uwriteln!(&mut self.link, "[ir {} bits{}]", frame.bits, tag).ok();
                }
                self.link.send_frame(&frame).ok();
            }
        }
    }

    impl uWrite for Board {
        type Error = core::convert::Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
            self.link.write_str(s)
        }
    }

    impl Platform for Board {
        fn show(&mut self, value: DisplayValue) {
            DISPLAY_VALUE.set(value);
        }

        fn hold_ms(&mut self, ms: u16) {
            for _ in 0..ms {
                self.delay.delay_ms(1);
                self.service_ir();
            }
        }

        fn entropy(&mut self) -> u32 {
            JITTER.sample()
        }

        fn discard_input(&mut self) {
            RX_BYTES.clear();
        }

        #[cfg(feature = "diag")]
        fn trace(&mut self, state: GameState) {
            uwriteln!(&mut self.link, "[{}]", state.name()).ok();
        }
    }

    #[arduino_hal::entry]
    fn main() -> ! {
        let dp = arduino_hal::Peripherals::take().unwrap();
        let pins = arduino_hal::pins!(dp);

        let mut serial = arduino_hal::default_serial!(dp, pins, BAUD_RATE);
        serial.listen(arduino_hal::hal::usart::Event::RxComplete);

        let mux = Multiplexer::new(
            pins.d2.into_output(),
            pins.d5.into_output(),
            pins.d13.into_output(),
            pins.d38.into_output(),
        );
        let receiver = IrReceiver::new(pins.d3.into_floating_input(), pins.d22.into_output());

        interrupt::free(|cs| {
            DISPLAY.borrow(cs).replace(Some(mux));
            RECEIVER.borrow(cs).replace(Some(receiver));
        });

        multiplex_timer_init(dp.TC0);
        sample_timer_init(dp.TC3);

        let mut board = Board {
            link: SerialLink::new(Console(serial)),
            delay: arduino_hal::Delay::new(),
        };
        let mut game = Game::new(SequenceRng::new(LCG_INITIAL_SEED));

        // SAFETY: all shared state is in place before the first interrupt.
        unsafe { avr_device::interrupt::enable() };

        let mut rx = &RX_BYTES;
        loop {
            game.run(&mut board).ok();
            board.service_ir();
            if let Ok(byte) = rx.try_receive() {
                game.on_byte(byte, &mut board);
            }
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("simon-seg is firmware for the Arduino Mega 2560; build it for the AVR target.");
}
