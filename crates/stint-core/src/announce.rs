/// Sink for short human-readable status messages, intended for assistive
/// technology. Fire-and-forget: implementations must not block and must not
/// fail visibly to the caller.
pub trait Announce {
    fn announce(&self, message: &str);
}

/// Discards every announcement. Useful for embedders that render state
/// directly instead of surfacing status strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Announce for NullSink {
    fn announce(&self, _message: &str) {}
}
