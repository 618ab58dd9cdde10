// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Header block written once before the record stream.

use core::fmt::Write;

use crate::config::SENSOR_COUNT;
use crate::error::Error;
use crate::telemetry::record::{FLOAT_WIDTH, SENSOR_WIDTH};
use crate::telemetry::{Line, LineWriter};

pub const TITLE: &str = "Pololu Line-Dancer";

fn overflow<T>(_: T) -> Error {
    Error::LineOverflow
}

pub fn battery_line(volts: f32) -> Result<Line, Error> {
    let mut line = Line::new();
    write!(line, "Battery voltage: {:.3}", volts).map_err(overflow)?;
    Ok(line)
}

/// Column titles, padded with `_` to the record's field widths.
pub fn column_header() -> Result<Line, Error> {
    let mut line = Line::new();
    write!(
        line,
        "|{:_^fw$}|{:_^fw$}|",
        "TIM",
        "PRX",
        fw = FLOAT_WIDTH
    )
    .map_err(overflow)?;

    for i in 1..=SENSOR_COUNT {
        let mut name: heapless::String<SENSOR_WIDTH> = heapless::String::new();
        write!(name, "SN-{}", i).map_err(overflow)?;
        write!(line, "{:_^sw$}|", name.as_str(), sw = SENSOR_WIDTH).map_err(overflow)?;
    }
    Ok(line)
}

/// Blank row with the column separators in place.
pub fn spacer() -> Result<Line, Error> {
    let mut line = Line::new();
    write!(line, "|{:fw$}|{:fw$}|", "", "", fw = FLOAT_WIDTH).map_err(overflow)?;
    for _ in 0..SENSOR_COUNT {
        write!(line, "{:sw$}|", "", sw = SENSOR_WIDTH).map_err(overflow)?;
    }
    Ok(line)
}

/// Write title, battery voltage, legend and column header.
pub fn write_header<W: LineWriter>(out: &mut W, battery_volts: f32) -> Result<(), Error> {
    out.write_line(TITLE)?;
    out.write_line(&battery_line(battery_volts)?)?;

    out.write_line("Robot data log key:")?;
    out.write_line("TIM = time since robot started")?;
    out.write_line("PRX = Robot proximity to track")?;
    let mut key = Line::new();
    write!(
        key,
        "SN-X = Where X is the light sensor ID from left->right/1->{}",
        SENSOR_COUNT
    )
    .map_err(overflow)?;
    out.write_line(&key)?;
    out.write_line("")?;

    out.write_line(&column_header()?)?;
    out.write_line(&spacer()?)
}
