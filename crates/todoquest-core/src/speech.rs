//! Speech-capture capability seam.
//!
//! The host may or may not be able to transcribe voice. The core depends
//! only on this trait; absence of the capability degrades to a no-op at
//! the call site, never a crash.

use crate::error::{CoreError, Result};

/// Single-shot transcription capability.
pub trait SpeechCapture {
    /// Capture one utterance and return its transcript.
    fn transcribe(&self) -> Result<String>;
}

/// The default on hosts without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSpeech;

impl SpeechCapture for UnavailableSpeech {
    fn transcribe(&self) -> Result<String> {
        Err(CoreError::CapabilityUnavailable("speech capture"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_reports_missing_capability() {
        let err = UnavailableSpeech.transcribe().unwrap_err();
        assert!(matches!(err, CoreError::CapabilityUnavailable(_)));
    }
}
