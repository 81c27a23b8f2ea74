use crate::decoder::FskDecoder;
use embedded_hal::delay::DelayNs;

/// Runs a blocking loop that repeatedly calls `tick()` on the decoder.
///
/// This is a simple timing loop for use in environments where interrupts
/// are unavailable or undesired. It drives the decoder's sampling using a
/// delay provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `decoder`: A mutable reference to an [`FskDecoder`] instance.
/// - `delay`: A delay provider, typically from the HAL.
/// - `tick_us`: The delay between ticks, in microseconds (reference: 5000).
///
/// # Example
/// ```ignore
/// use fskrx::timer::run_fsk_tick_loop;
/// let mut decoder = FskDecoder::new(comp, None, DecoderConfig::default()).unwrap();
/// decoder.set_mode_rx();
/// run_fsk_tick_loop(&mut decoder, &mut delay, fskrx::timer::TICK_US);
/// ```
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling
///   firmware. Take completed outcomes from an interrupt or restructure the
///   loop body if the host needs them inline.
/// - A 500 ms bit period is tolerant of delay jitter, but the tick should
///   still come from a hardware timer where one is available.
pub fn run_fsk_tick_loop<D: DelayNs, COMP, OUT>(
    decoder: &mut FskDecoder<COMP, OUT>,
    delay: &mut D,
    tick_us: u32,
) -> !
where
    COMP: embedded_hal::digital::InputPin,
    OUT: embedded_hal::digital::OutputPin,
{
    loop {
        decoder.tick();
        delay.delay_us(tick_us);
    }
}
