//! Device Drivers
//!
//! The three devices the kernel polls or drives: the text screen, the PS/2
//! keyboard and the CMOS clock. Port I/O sits behind small traits so the
//! drivers run unchanged in the host simulator.

pub mod keyboard;
pub mod rtc;
pub mod vga;
