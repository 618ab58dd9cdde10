// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Battery voltage measured through a resistor divider on an ADC channel.

use crate::error::Error;
use crate::sensors::{BatteryMonitor, ADC_FULL_SCALE};

/// ADC reference voltage.
pub const ADC_REF_VOLTS: f32 = 3.3;

/// `ReadRaw` is a closure that returns the raw 12-bit ADC reading (0..4095) at the divider tap.
pub struct AnalogBattery<ReadRaw> {
    read_raw: ReadRaw,
    /// Battery voltage divided by tap voltage, e.g. 3.0 for a 20k/10k divider.
    divider_ratio: f32,
}

impl<ReadRaw> AnalogBattery<ReadRaw>
where
    ReadRaw: FnMut() -> u16,
{
    pub fn new(read_raw: ReadRaw, divider_ratio: f32) -> Self {
        Self {
            read_raw,
            divider_ratio,
        }
    }
}

impl<ReadRaw> BatteryMonitor for AnalogBattery<ReadRaw>
where
    ReadRaw: FnMut() -> u16,
{
    fn battery_volts(&mut self) -> Result<f32, Error> {
        let raw = (self.read_raw)();
        if raw > ADC_FULL_SCALE {
            return Err(Error::Battery);
        }
        let tap = raw as f32 * ADC_REF_VOLTS / ADC_FULL_SCALE as f32;
        Ok(tap * self.divider_ratio)
    }
}
