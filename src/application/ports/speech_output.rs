//! Speech output port interface

/// Port for spoken feedback.
///
/// Fire-and-forget by contract: no completion callback, and a failing
/// backend must not surface an error to the caller. Adapters that shell
/// out are expected to spawn and log failures themselves.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str);
}

/// Blanket implementation for boxed output types
impl SpeechOutput for Box<dyn SpeechOutput> {
    fn speak(&self, text: &str) {
        self.as_ref().speak(text);
    }
}
