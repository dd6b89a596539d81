//! Signal bank trait for abstraction and testability
//!
//! This trait is the narrow hardware seam: raw physical levels per signal,
//! with no knowledge of polarity. The real implementation drives GPIO pins;
//! tests swap in a mock.

/// Physical output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine {
    /// MUX_SEL
    MuxSel,
    /// MUX_nOE, active low
    MuxNoe,
    /// EN_0
    En0,
    /// EN_1
    En1,
}

/// Physical input lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    /// nFAULT_0, active low
    NFault0,
    /// nFAULT_1, active low
    NFault1,
}

/// Abstract access to the six physical signals
///
/// Output reads report the driven (latched) level, not the pad level.
/// Input reads sample the pin on every call.
pub trait SignalBank {
    /// Drive an output high or low
    fn set_output(&mut self, line: OutputLine, high: bool);

    /// Read back the level an output is currently driving
    fn output_is_high(&mut self, line: OutputLine) -> bool;

    /// Sample an input
    fn input_is_high(&mut self, line: InputLine) -> bool;
}
