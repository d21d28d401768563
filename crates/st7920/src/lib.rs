#![cfg_attr(not(test), no_std)]

//! ST7920 (128x64 graphic LCD, bit-banged serial mode) driver primitives.
//!
//! The driver keeps two framebuffers: the one the application draws into
//! and a copy of what the panel currently shows. [`St7920::refresh`] only
//! sends the 16-bit words that differ between them.

mod framebuffer;
pub mod protocol;

pub use framebuffer::FrameBuffer;

use embedded_hal::{delay::DelayNs, digital::OutputPin, pwm::SetDutyCycle};
use log::trace;

use protocol::{Register, WordWrite};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Time SCLK is held high for each pulse.
    pub pulse_hold_ns: u32,
    /// Extra settle time after every framed byte.
    pub byte_settle_ns: u32,
    /// Wait after the DDRAM clear command during initialization.
    pub clear_settle_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pulse_hold_ns: 0,
            byte_settle_ns: 0,
            clear_settle_us: 1_600,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SidErr, SclkErr, BlaErr> {
    /// SID (serial data) pin operation failed.
    Sid(SidErr),
    /// SCLK pin operation failed.
    Sclk(SclkErr),
    /// Backlight channel operation failed.
    Backlight(BlaErr),
}

pub type DriverResult<T, SidErr, SclkErr, BlaErr> = Result<T, Error<SidErr, SclkErr, BlaErr>>;

/// ST7920 driver owning the serial lines, the backlight and both framebuffers.
#[derive(Debug)]
pub struct St7920<SID, SCLK, BLA, D> {
    sid: SID,
    sclk: SCLK,
    backlight: BLA,
    delay: D,
    config: Config,
    pending: FrameBuffer,
    committed: FrameBuffer,
}

impl<SID, SCLK, BLA, D> St7920<SID, SCLK, BLA, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BLA: SetDutyCycle,
    D: DelayNs,
{
    /// Creates a new driver instance. Nothing is sent until [`Self::initialize`].
    pub fn new(sid: SID, sclk: SCLK, backlight: BLA, delay: D, config: Config) -> Self {
        Self {
            sid,
            sclk,
            backlight,
            delay,
            config,
            pending: FrameBuffer::new(),
            committed: FrameBuffer::new(),
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned lines and the delay provider.
    pub fn release(self) -> (SID, SCLK, BLA, D) {
        (self.sid, self.sclk, self.backlight, self.delay)
    }

    /// Framebuffer the application draws into.
    pub fn frame(&self) -> &FrameBuffer {
        &self.pending
    }

    /// Mutable framebuffer the application draws into.
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.pending
    }

    /// What the panel is believed to show after the last refresh.
    pub fn committed(&self) -> &FrameBuffer {
        &self.committed
    }

    /// Switches the panel to graphics mode.
    pub fn initialize(&mut self) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.sid.set_low().map_err(Error::Sid)?;
        self.sclk.set_low().map_err(Error::Sclk)?;

        self.write_command(protocol::CMD_BASIC_SET)?;
        self.write_command(protocol::CMD_CLEAR)?;
        self.delay.delay_us(self.config.clear_settle_us);
        self.write_command(protocol::CMD_EXTENDED_SET)?;
        self.write_command(protocol::CMD_GRAPHICS_ON)
    }

    /// Sets backlight intensity in percent (clamped to 100).
    pub fn set_backlight(
        &mut self,
        percent: u8,
    ) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.backlight
            .set_duty_cycle_percent(percent.min(100))
            .map_err(Error::Backlight)
    }

    pub fn backlight_on(&mut self) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.backlight
            .set_duty_cycle_fully_on()
            .map_err(Error::Backlight)
    }

    pub fn backlight_off(&mut self) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.backlight
            .set_duty_cycle_fully_off()
            .map_err(Error::Backlight)
    }

    /// Sends the words that changed since the last refresh.
    ///
    /// Returns the number of words written. On a bus error the committed
    /// frame is left untouched so the next refresh resends the same words.
    pub fn refresh(&mut self) -> DriverResult<usize, SID::Error, SCLK::Error, BLA::Error> {
        let current = self.committed.clone();
        let target = self.pending.clone();
        let written = self.write_words(protocol::diff_words(&current, &target))?;

        self.committed = target;
        trace!("st7920: refresh wrote {} words", written);
        Ok(written)
    }

    /// Sends every word regardless of the committed state.
    ///
    /// Use after power-on or whenever the panel may have lost sync with the buffer.
    pub fn refresh_force(&mut self) -> DriverResult<usize, SID::Error, SCLK::Error, BLA::Error> {
        let target = self.pending.clone();
        let written = self.write_words(protocol::all_words(&target))?;

        self.committed = target;
        trace!("st7920: forced refresh wrote {} words", written);
        Ok(written)
    }

    fn write_words(
        &mut self,
        writes: impl Iterator<Item = WordWrite>,
    ) -> DriverResult<usize, SID::Error, SCLK::Error, BLA::Error> {
        let mut written = 0usize;
        for write in writes {
            self.write_word(write)?;
            written += 1;
        }
        Ok(written)
    }

    fn write_word(
        &mut self,
        write: WordWrite,
    ) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        let [vertical, horizontal] = protocol::address_commands(write.address);
        self.write_command(vertical)?;
        self.write_command(horizontal)?;
        self.write_data(write.data[0])?;
        self.write_data(write.data[1])
    }

    /// Writes a command byte (RS low).
    pub fn write_command(
        &mut self,
        value: u8,
    ) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.write_byte(Register::Command, value)
    }

    /// Writes a data byte (RS high).
    pub fn write_data(
        &mut self,
        value: u8,
    ) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        self.write_byte(Register::Data, value)
    }

    /// Writes one framed byte.
    pub fn write_byte(
        &mut self,
        register: Register,
        value: u8,
    ) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        for bit in protocol::byte_frame_bits(register, value) {
            self.write_bit(bit)?;
        }

        if self.config.byte_settle_ns > 0 {
            self.delay.delay_ns(self.config.byte_settle_ns);
        }
        Ok(())
    }

    fn write_bit(&mut self, bit: bool) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        if bit {
            self.sid.set_high().map_err(Error::Sid)?;
        } else {
            self.sid.set_low().map_err(Error::Sid)?;
        }

        self.sclk.set_high().map_err(Error::Sclk)?;
        if self.config.pulse_hold_ns > 0 {
            self.delay.delay_ns(self.config.pulse_hold_ns);
        }
        self.sclk.set_low().map_err(Error::Sclk)
    }
}
