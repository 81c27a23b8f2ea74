/// Declares a static global `FSK_DECODER` instance protected by a
/// `critical_section` mutex.
///
/// This macro creates a `static` singleton `FSK_DECODER` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared decoder state.
///
/// # Arguments
/// - `$comp`: The concrete type of the comparator pin (must implement `InputPin`)
/// - `$out`: The concrete type of the debug output pin (must implement `OutputPin`)
///
/// # Example
/// ```ignore
/// init_fsk_decoder!(MyCompPinType, MyOutPinType);
/// ```
#[macro_export]
macro_rules! init_fsk_decoder {
    ( $comp:ty, $out:ty ) => {
        pub static FSK_DECODER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::decoder::FskDecoder<$comp, $out>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `FSK_DECODER` singleton with a new decoder.
///
/// Wraps construction of the [`FskDecoder`](crate::decoder::FskDecoder) and
/// stores it inside the globally declared `FSK_DECODER` created by
/// [`init_fsk_decoder!`]. Expands to a
/// `Result<(), ConfigError>`, so configuration mistakes surface at setup.
///
/// # Arguments
/// - `$comp`: The comparator pin (must implement `InputPin`)
/// - `$bit_out`: `Option<..>` of the debug output pin
/// - `$config`: A [`DecoderConfig`](crate::config::DecoderConfig) value
///
/// # Example
/// ```ignore
/// fn main() {
///     setup_fsk_decoder!(comp, None, DecoderConfig::default()).unwrap();
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in `main()`).
/// - Requires `init_fsk_decoder!` to have been used earlier.
#[macro_export]
macro_rules! setup_fsk_decoder {
    ( $comp:expr, $bit_out:expr, $config:expr ) => {
        match $crate::decoder::FskDecoder::new($comp, $bit_out, $config) {
            Ok(decoder) => {
                $crate::critical_section::with(|cs| {
                    let _ = FSK_DECODER.borrow(cs).replace(Some(decoder));
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    };
}

/// Calls `tick()` on the global `FSK_DECODER` if it has been initialized.
///
/// This macro is intended to be invoked from a timer ISR or scheduler to
/// advance the decode pipeline at regular intervals (reference: every 5 ms).
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_fsk_decoder!();
/// }
/// ```
///
/// # Notes
/// - This macro assumes `FSK_DECODER` was declared with `init_fsk_decoder!`
///   and initialized via `setup_fsk_decoder!`.
/// - Safe to call repeatedly — will silently do nothing if the decoder
///   hasn't been set up yet.
#[macro_export]
macro_rules! tick_fsk_decoder {
    () => {
        $crate::critical_section::with(|cs| {
            if let Some(decoder) = FSK_DECODER.borrow(cs).borrow_mut().as_mut() {
                decoder.tick();
            }
        });
    };
}
