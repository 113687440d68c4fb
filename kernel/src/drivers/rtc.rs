//! CMOS Real-Time Clock
//!
//! Wall-clock time for `date` and `time`. The CMOS registers hold BCD
//! values; the year register has two digits and is taken as 20xx.

use core::fmt;

/// CMOS register select port.
pub const CMOS_ADDRESS: u16 = 0x70;
/// CMOS data port.
pub const CMOS_DATA: u16 = 0x71;

const REG_SECONDS: u8 = 0x00;
const REG_MINUTES: u8 = 0x02;
const REG_HOURS: u8 = 0x04;
const REG_DAY: u8 = 0x07;
const REG_MONTH: u8 = 0x08;
const REG_YEAR: u8 = 0x09;

/// A calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcTime {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl RtcTime {
    /// `D/M/YYYY`, no zero padding.
    pub fn date(&self) -> impl fmt::Display + '_ {
        DateFmt(self)
    }

    /// `H:MM:SS`.
    pub fn time(&self) -> impl fmt::Display + '_ {
        TimeFmt(self)
    }
}

struct DateFmt<'a>(&'a RtcTime);
struct TimeFmt<'a>(&'a RtcTime);

impl fmt::Display for DateFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.day, self.0.month, self.0.year)
    }
}

impl fmt::Display for TimeFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.0.hour, self.0.minute, self.0.second)
    }
}

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&mut self) -> RtcTime;
}

/// Indexed access to the CMOS register file.
pub trait CmosPort {
    fn read_register(&mut self, reg: u8) -> u8;
}

/// Packed BCD byte to binary.
pub const fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Decode the six time registers.
pub fn read_cmos<P: CmosPort + ?Sized>(port: &mut P) -> RtcTime {
    RtcTime {
        second: bcd_to_bin(port.read_register(REG_SECONDS)),
        minute: bcd_to_bin(port.read_register(REG_MINUTES)),
        hour: bcd_to_bin(port.read_register(REG_HOURS)),
        day: bcd_to_bin(port.read_register(REG_DAY)),
        month: bcd_to_bin(port.read_register(REG_MONTH)),
        year: 2000 + bcd_to_bin(port.read_register(REG_YEAR)) as u16,
    }
}

/// [`Clock`] backed by the CMOS chip.
pub struct CmosClock<P: CmosPort> {
    port: P,
}

impl<P: CmosPort> CmosClock<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }
}

impl<P: CmosPort> Clock for CmosClock<P> {
    fn now(&mut self) -> RtcTime {
        read_cmos(&mut self.port)
    }
}

/// A clock that always reads the same time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub RtcTime);

impl Clock for FixedClock {
    fn now(&mut self) -> RtcTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    struct Registers([u8; 10]);

    impl CmosPort for Registers {
        fn read_register(&mut self, reg: u8) -> u8 {
            self.0[reg as usize]
        }
    }

    #[test]
    fn test_bcd() {
        assert_eq!(bcd_to_bin(0x00), 0);
        assert_eq!(bcd_to_bin(0x09), 9);
        assert_eq!(bcd_to_bin(0x59), 59);
        assert_eq!(bcd_to_bin(0x23), 23);
    }

    #[test]
    fn test_read_cmos() {
        let mut regs = [0u8; 10];
        regs[0x00] = 0x07;
        regs[0x02] = 0x05;
        regs[0x04] = 0x09;
        regs[0x07] = 0x17;
        regs[0x08] = 0x10;
        regs[0x09] = 0x26;
        let mut clock = CmosClock::new(Registers(regs));
        let now = clock.now();
        assert_eq!(format!("{}", now.date()), "17/10/2026");
        assert_eq!(format!("{}", now.time()), "9:05:07");
    }
}
