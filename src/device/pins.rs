//! GPIO-backed signal bank
//!
//! Binds the six physical signals to embedded-hal pins. Output pins must
//! support read-back of their latched level.

use crate::device::traits::{InputLine, OutputLine, SignalBank};
use core::convert::Infallible;
use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};

/// Six GPIOs wired to the mux and the VBUS power switches
pub struct PinBank<SEL, NOE, EN0, EN1, F0, F1> {
    mux_sel: SEL,
    mux_noe: NOE,
    en0: EN0,
    en1: EN1,
    nfault0: F0,
    nfault1: F1,
}

impl<SEL, NOE, EN0, EN1, F0, F1> PinBank<SEL, NOE, EN0, EN1, F0, F1>
where
    SEL: StatefulOutputPin<Error = Infallible>,
    NOE: StatefulOutputPin<Error = Infallible>,
    EN0: StatefulOutputPin<Error = Infallible>,
    EN1: StatefulOutputPin<Error = Infallible>,
    F0: InputPin<Error = Infallible>,
    F1: InputPin<Error = Infallible>,
{
    /// Build the bank and drive the safe default levels
    ///
    /// nOE high (mux disabled), SEL low, both VBUS enables low.
    pub fn new(mux_sel: SEL, mux_noe: NOE, en0: EN0, en1: EN1, nfault0: F0, nfault1: F1) -> Self {
        let mut bank = Self {
            mux_sel,
            mux_noe,
            en0,
            en1,
            nfault0,
            nfault1,
        };
        bank.set_output(OutputLine::MuxNoe, true);
        bank.set_output(OutputLine::MuxSel, false);
        bank.set_output(OutputLine::En0, false);
        bank.set_output(OutputLine::En1, false);
        bank
    }
}

impl<SEL, NOE, EN0, EN1, F0, F1> SignalBank for PinBank<SEL, NOE, EN0, EN1, F0, F1>
where
    SEL: StatefulOutputPin<Error = Infallible>,
    NOE: StatefulOutputPin<Error = Infallible>,
    EN0: StatefulOutputPin<Error = Infallible>,
    EN1: StatefulOutputPin<Error = Infallible>,
    F0: InputPin<Error = Infallible>,
    F1: InputPin<Error = Infallible>,
{
    fn set_output(&mut self, line: OutputLine, high: bool) {
        let state = PinState::from(high);
        let result = match line {
            OutputLine::MuxSel => self.mux_sel.set_state(state),
            OutputLine::MuxNoe => self.mux_noe.set_state(state),
            OutputLine::En0 => self.en0.set_state(state),
            OutputLine::En1 => self.en1.set_state(state),
        };
        infallible(result)
    }

    fn output_is_high(&mut self, line: OutputLine) -> bool {
        infallible(match line {
            OutputLine::MuxSel => self.mux_sel.is_set_high(),
            OutputLine::MuxNoe => self.mux_noe.is_set_high(),
            OutputLine::En0 => self.en0.is_set_high(),
            OutputLine::En1 => self.en1.is_set_high(),
        })
    }

    fn input_is_high(&mut self, line: InputLine) -> bool {
        infallible(match line {
            InputLine::NFault0 => self.nfault0.is_high(),
            InputLine::NFault1 => self.nfault1.is_high(),
        })
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
