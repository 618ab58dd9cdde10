// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 support using direct PAC register access.
//!
//! Blocking single-channel conversions, 12-bit, right-aligned, software triggered. The reflectance
//! sensors and the battery tap are all on ADC1 and are read one at a time.
//!
//! Example:
//! ```ignore
//! let adc = RefCell::new(Adc::adc1(dp.ADC1));
//! let mut read_sensor = |i| adc.borrow_mut().read(SENSOR_CHANNELS[i]);
//! ```

use stm32f7xx_hal::pac;

use crate::config::SENSOR_COUNT;

/// Reflectance sensors, left to right: PA0..PA4 (ADC1_IN0..IN4).
pub const SENSOR_CHANNELS: [u8; SENSOR_COUNT] = [0, 1, 2, 3, 4];

/// Battery divider tap: PC0 (ADC1_IN10).
pub const BATTERY_CHANNEL: u8 = 10;

/// Wrapper over the PAC ADC1 peripheral.
pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Enable the ADC1 clock and power the converter up.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 12-bit, right-aligned, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Long sample time on every channel we use; the sensor outputs are high impedance.
        adc1.smpr2.modify(|_, w| {
            w.smp0().bits(0b111);
            w.smp1().bits(0b111);
            w.smp2().bits(0b111);
            w.smp3().bits(0b111);
            w.smp4().bits(0b111)
        });
        adc1.smpr1.modify(|_, w| w.smp10().bits(0b111));

        // Sequence length = 1 conversion
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Convert a single channel, blocking until the result is ready.
    pub fn read(&mut self, channel: u8) -> u16 {
        self.adc
            .sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        self.adc.cr2.modify(|_, w| w.swstart().set_bit());
        while self.adc.sr.read().eoc().bit_is_clear() {}

        self.adc.dr.read().data().bits() as u16
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}
