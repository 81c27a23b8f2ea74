use crate::config::{ConfigError, DecoderConfig};
use crate::decoder::FskDecoder;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::{InputPin, OutputPin};

/// Used to initialize the global static `FskDecoder` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```ignore
/// use fskrx::decoder::FskDecoder;
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use some_hal::{PD1, PD2};
///
/// static FSK_DECODER: Mutex<RefCell<Option<FskDecoder<PD1, PD2>>>> =
///     global_fsk_decoder_init::<PD1, PD2>();
/// ```
pub const fn global_fsk_decoder_init<COMP: InputPin, OUT: OutputPin>()
-> Mutex<RefCell<Option<FskDecoder<COMP, OUT>>>> {
    Mutex::new(RefCell::new(None))
}

/// Builds the decoder and stores it in the global singleton.
///
/// # Arguments
/// * The global static `FskDecoder`
/// * The comparator input pin
/// * The optional decoded-bit debug output pin
/// * The decoder configuration (thresholds, bit period, stall timeout)
///
/// # Errors
/// Fails with [`ConfigError`] if the configuration is inconsistent; the
/// singleton is left empty in that case.
///
/// # Example
/// ```ignore
/// fn main() {
///     global_fsk_decoder_setup(&FSK_DECODER, comp, None, DecoderConfig::default()).unwrap();
/// }
/// ```
pub fn global_fsk_decoder_setup<COMP: InputPin, OUT: OutputPin>(
    global_decoder: &'static Mutex<RefCell<Option<FskDecoder<COMP, OUT>>>>,
    comp: COMP,
    bit_out: Option<OUT>,
    config: DecoderConfig,
) -> Result<(), ConfigError> {
    let decoder = FskDecoder::new(comp, bit_out, config)?;
    critical_section::with(|cs| {
        let _ = global_decoder.borrow(cs).replace(Some(decoder));
    });
    Ok(())
}

/// Runs the decoder tick at each interrupt
///
/// # Arguments
/// * The global static `FskDecoder`
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     global_fsk_decoder_tick(&FSK_DECODER);
/// }
/// ```
pub fn global_fsk_decoder_tick<COMP: InputPin, OUT: OutputPin>(
    global_decoder: &'static Mutex<RefCell<Option<FskDecoder<COMP, OUT>>>>,
) {
    critical_section::with(|cs| {
        if let Some(decoder) = global_decoder.borrow(cs).borrow_mut().as_mut() {
            decoder.tick();
        }
    });
}
