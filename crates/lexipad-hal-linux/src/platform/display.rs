use core::fmt;

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    pwm::{self, SetDutyCycle},
};
use lexipad_core::app::FrameSink;
use linux_embedded_hal::{
    CdevPin, Delay,
    gpio_cdev::{self, Chip, LineRequestFlags},
};
use log::{info, warn};
use st7920::{Config, DriverResult, FrameBuffer, St7920};

const CONSUMER_SID: &str = "lexipad-sid";
const CONSUMER_SCLK: &str = "lexipad-sclk";
const CONSUMER_BLA: &str = "lexipad-bla";

/// GPIO chip and BCM line offsets the panel is wired to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PanelPins {
    pub chip: String,
    pub sid: u32,
    pub sclk: u32,
    pub backlight: u32,
}

impl Default for PanelPins {
    fn default() -> Self {
        Self {
            chip: String::from("/dev/gpiochip0"),
            sid: 23,
            sclk: 24,
            backlight: 12,
        }
    }
}

#[derive(Debug)]
pub enum GpioError {
    Chip {
        path: String,
        source: gpio_cdev::Error,
    },
    Line {
        offset: u32,
        source: gpio_cdev::Error,
    },
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chip { path, .. } => write!(f, "opening GPIO chip {path}"),
            Self::Line { offset, .. } => write!(f, "requesting GPIO line {offset}"),
        }
    }
}

impl std::error::Error for GpioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Chip { source, .. } | Self::Line { source, .. } => Some(source),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BacklightError<E>(pub E);

impl<E: fmt::Debug> pwm::Error for BacklightError<E> {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

/// Presents a plain on/off GPIO line as a duty-cycle channel.
///
/// Backlight enable line without dimming: any non-zero duty switches it high.
#[derive(Debug)]
pub struct OnOffBacklight<P> {
    pin: P,
}

impl<P: OutputPin> OnOffBacklight<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> pwm::ErrorType for OnOffBacklight<P> {
    type Error = BacklightError<P::Error>;
}

impl<P: OutputPin> SetDutyCycle for OnOffBacklight<P> {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty == 0 {
            self.pin.set_low().map_err(BacklightError)
        } else {
            self.pin.set_high().map_err(BacklightError)
        }
    }
}

pub type LinuxPanel = St7920<CdevPin, CdevPin, OnOffBacklight<CdevPin>, Delay>;

/// Requests the panel lines as outputs, all driven low.
pub fn open_panel(pins: &PanelPins, config: Config) -> Result<LinuxPanel, GpioError> {
    let mut chip = Chip::new(&pins.chip).map_err(|source| GpioError::Chip {
        path: pins.chip.clone(),
        source,
    })?;

    let sid = request_output(&mut chip, pins.sid, CONSUMER_SID)?;
    let sclk = request_output(&mut chip, pins.sclk, CONSUMER_SCLK)?;
    let backlight = request_output(&mut chip, pins.backlight, CONSUMER_BLA)?;
    info!(
        "display: lines acquired chip={} sid={} sclk={} bla={}",
        pins.chip, pins.sid, pins.sclk, pins.backlight
    );

    Ok(St7920::new(
        sid,
        sclk,
        OnOffBacklight::new(backlight),
        Delay {},
        config,
    ))
}

fn request_output(chip: &mut Chip, offset: u32, consumer: &str) -> Result<CdevPin, GpioError> {
    let line_error = |source| GpioError::Line { offset, source };
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(LineRequestFlags::OUTPUT, 0, consumer))
        .map_err(line_error)?;
    CdevPin::new(handle).map_err(line_error)
}

/// Initialized panel that is blanked and darkened when dropped.
pub struct DisplayHandle<SID, SCLK, BLA, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BLA: SetDutyCycle,
    D: DelayNs,
{
    driver: St7920<SID, SCLK, BLA, D>,
    shut_down: bool,
}

impl<SID, SCLK, BLA, D> DisplayHandle<SID, SCLK, BLA, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BLA: SetDutyCycle,
    D: DelayNs,
{
    /// Initializes the controller and switches the backlight on or off.
    pub fn start(
        mut driver: St7920<SID, SCLK, BLA, D>,
        backlight: bool,
    ) -> DriverResult<Self, SID::Error, SCLK::Error, BLA::Error> {
        driver.initialize()?;
        if backlight {
            driver.backlight_on()?;
        } else {
            driver.backlight_off()?;
        }
        Ok(Self {
            driver,
            shut_down: false,
        })
    }

    pub fn driver(&self) -> &St7920<SID, SCLK, BLA, D> {
        &self.driver
    }

    /// Blanks the panel and turns the backlight off. Only the first call has effect.
    pub fn shutdown(&mut self) -> DriverResult<(), SID::Error, SCLK::Error, BLA::Error> {
        if self.shut_down {
            return Ok(());
        }
        self.shut_down = true;

        self.driver.frame_mut().fill(false);
        self.driver.refresh()?;
        self.driver.backlight_off()?;
        info!("display: shut down");
        Ok(())
    }
}

impl<SID, SCLK, BLA, D> FrameSink for DisplayHandle<SID, SCLK, BLA, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BLA: SetDutyCycle,
    D: DelayNs,
{
    type Error = st7920::Error<SID::Error, SCLK::Error, BLA::Error>;

    fn frame_mut(&mut self) -> &mut FrameBuffer {
        self.driver.frame_mut()
    }

    fn present(&mut self, force: bool) -> Result<usize, Self::Error> {
        if force {
            self.driver.refresh_force()
        } else {
            self.driver.refresh()
        }
    }
}

impl<SID, SCLK, BLA, D> Drop for DisplayHandle<SID, SCLK, BLA, D>
where
    SID: OutputPin,
    SCLK: OutputPin,
    BLA: SetDutyCycle,
    D: DelayNs,
{
    fn drop(&mut self) {
        if self.shutdown().is_err() {
            warn!("display: shutdown on drop failed");
        }
    }
}
