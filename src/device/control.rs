//! Logical device state over the physical signal bank
//!
//! Translates boolean intent to and from pin polarity. Nothing is cached:
//! every read goes to the bank, so fault flags are always live.

use crate::device::traits::{InputLine, OutputLine, SignalBank};

/// Snapshot of every logical signal, sampled in one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStatus {
    pub mux_sel: bool,
    pub mux_output_enabled: bool,
    pub channel0_enabled: bool,
    pub channel1_enabled: bool,
    pub fault0: bool,
    pub fault1: bool,
}

/// Owner of the mux and VBUS power-path signals
pub struct DeviceControl<S: SignalBank> {
    bank: S,
}

impl<S: SignalBank> DeviceControl<S> {
    /// Take ownership of the signal bank and apply the safe defaults
    pub fn new(bank: S) -> Self {
        let mut control = Self { bank };
        control.reset_to_defaults();
        control
    }

    /// Mux disabled, select 0, both VBUS channels off
    pub fn reset_to_defaults(&mut self) {
        self.set_mux_output_enabled(false);
        self.set_mux_sel(false);
        self.set_channel0_enabled(false);
        self.set_channel1_enabled(false);
    }

    pub fn set_mux_sel(&mut self, sel: bool) {
        self.bank.set_output(OutputLine::MuxSel, sel);
    }

    pub fn mux_sel(&mut self) -> bool {
        self.bank.output_is_high(OutputLine::MuxSel)
    }

    /// nOE is active low: enabled drives the pin low
    pub fn set_mux_output_enabled(&mut self, enabled: bool) {
        self.bank.set_output(OutputLine::MuxNoe, !enabled);
    }

    pub fn mux_output_enabled(&mut self) -> bool {
        !self.bank.output_is_high(OutputLine::MuxNoe)
    }

    pub fn set_channel0_enabled(&mut self, enabled: bool) {
        self.bank.set_output(OutputLine::En0, enabled);
    }

    pub fn channel0_enabled(&mut self) -> bool {
        self.bank.output_is_high(OutputLine::En0)
    }

    pub fn set_channel1_enabled(&mut self, enabled: bool) {
        self.bank.set_output(OutputLine::En1, enabled);
    }

    pub fn channel1_enabled(&mut self) -> bool {
        self.bank.output_is_high(OutputLine::En1)
    }

    /// Channel 0 fault, sampled now (nFAULT low means fault)
    pub fn fault0(&mut self) -> bool {
        !self.bank.input_is_high(InputLine::NFault0)
    }

    /// Channel 1 fault, sampled now
    pub fn fault1(&mut self) -> bool {
        !self.bank.input_is_high(InputLine::NFault1)
    }

    /// Read every signal
    pub fn status(&mut self) -> DeviceStatus {
        DeviceStatus {
            mux_sel: self.mux_sel(),
            mux_output_enabled: self.mux_output_enabled(),
            channel0_enabled: self.channel0_enabled(),
            channel1_enabled: self.channel1_enabled(),
            fault0: self.fault0(),
            fault1: self.fault1(),
        }
    }

    /// Borrow the underlying bank
    pub fn bank(&self) -> &S {
        &self.bank
    }

    /// Mutably borrow the underlying bank
    pub fn bank_mut(&mut self) -> &mut S {
        &mut self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::traits::mock::MockSignalBank;

    #[test]
    fn test_safe_defaults() {
        let mut bank = MockSignalBank::new();
        bank.set_output(OutputLine::MuxSel, true);
        bank.set_output(OutputLine::En0, true);

        let mut device = DeviceControl::new(bank);

        // nOE high = mux disabled
        assert!(device.bank().output(OutputLine::MuxNoe));
        assert!(!device.bank().output(OutputLine::MuxSel));
        assert!(!device.bank().output(OutputLine::En0));
        assert!(!device.bank().output(OutputLine::En1));

        let status = device.status();
        assert!(!status.mux_sel);
        assert!(!status.mux_output_enabled);
        assert!(!status.channel0_enabled);
        assert!(!status.channel1_enabled);
    }

    #[test]
    fn test_output_enable_is_inverted() {
        let mut device = DeviceControl::new(MockSignalBank::new());

        device.set_mux_output_enabled(true);
        assert!(!device.bank().output(OutputLine::MuxNoe));
        assert!(device.mux_output_enabled());

        device.set_mux_output_enabled(false);
        assert!(device.bank().output(OutputLine::MuxNoe));
        assert!(!device.mux_output_enabled());
    }

    #[test]
    fn test_direct_outputs() {
        let mut device = DeviceControl::new(MockSignalBank::new());

        device.set_mux_sel(true);
        device.set_channel0_enabled(true);
        assert!(device.bank().output(OutputLine::MuxSel));
        assert!(device.bank().output(OutputLine::En0));
        assert!(!device.bank().output(OutputLine::En1));
        assert!(device.mux_sel());
        assert!(device.channel0_enabled());

        device.set_channel1_enabled(true);
        device.set_channel0_enabled(false);
        assert!(device.channel1_enabled());
        assert!(!device.channel0_enabled());
    }

    #[test]
    fn test_faults_are_active_low_and_live() {
        let mut device = DeviceControl::new(MockSignalBank::new());

        assert!(!device.fault0());
        assert!(!device.fault1());

        device.bank_mut().set_input(InputLine::NFault0, false);
        assert!(device.fault0());
        assert!(!device.fault1());

        device.bank_mut().set_input(InputLine::NFault0, true);
        device.bank_mut().set_input(InputLine::NFault1, false);
        assert!(!device.fault0());
        assert!(device.fault1());
    }

    #[test]
    fn test_status_samples_faults_each_time() {
        let mut device = DeviceControl::new(MockSignalBank::new());

        let before = device.bank().input_reads();
        let _ = device.status();
        let _ = device.status();
        assert_eq!(device.bank().input_reads(), before + 4);
    }
}
