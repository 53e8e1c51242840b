//! The fake SSH handshake shown before the prompt appears.

use std::time::Duration;

use crate::session::LineKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootMessage {
    pub content: &'static str,
    /// Pause before this message is printed
    pub delay_ms: u64,
}

const fn msg(content: &'static str, delay_ms: u64) -> BootMessage {
    BootMessage { content, delay_ms }
}

/// Wait before the first boot message
pub const INITIAL_DELAY_MS: u64 = 2000;

pub const BOOT_MESSAGES: &[BootMessage] = &[
    msg("Initializing secure connection...", 0),
    msg("SSH handshake successful", 1200),
    msg("Authenticating user credentials...", 600),
    msg("RSA key fingerprint: SHA256:nThbg6kXUpJWGl7E1IGOCspRomTxdCARLviKw6E5SY8", 900),
    msg("Authentication successful", 700),
    msg("Establishing encrypted tunnel...", 500),
    msg("Connection established - AES-256 encryption active", 800),
    msg("", 400),
    msg("Welcome to yflong secure terminal", 600),
    msg("Connecting to yflong-server.local:22...", 0),
    msg("", 200),
];

/// Progress messages that report success are highlighted
pub fn boot_line_kind(content: &str) -> LineKind {
    if ["successful", "established", "active"]
        .iter()
        .any(|w| content.contains(w))
    {
        LineKind::Success
    } else {
        LineKind::Output
    }
}

/// Delay scaled by `speed`; zero or negative speeds skip the wait
pub fn scaled_delay(delay_ms: u64, speed: f64) -> Duration {
    if speed <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_millis((delay_ms as f64 / speed) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kinds() {
        assert_eq!(boot_line_kind("SSH handshake successful"), LineKind::Success);
        assert_eq!(
            boot_line_kind("Connection established - AES-256 encryption active"),
            LineKind::Success
        );
        assert_eq!(boot_line_kind("Welcome to yflong secure terminal"), LineKind::Output);
        assert_eq!(boot_line_kind(""), LineKind::Output);
    }

    #[test]
    fn test_sequence_shape() {
        assert_eq!(BOOT_MESSAGES.len(), 11);
        assert_eq!(BOOT_MESSAGES[0].delay_ms, 0);
        let successes = BOOT_MESSAGES
            .iter()
            .filter(|m| boot_line_kind(m.content) == LineKind::Success)
            .count();
        assert_eq!(successes, 3);
    }

    #[test]
    fn test_scaled_delay() {
        assert_eq!(scaled_delay(1200, 1.0), Duration::from_millis(1200));
        assert_eq!(scaled_delay(1200, 2.0), Duration::from_millis(600));
        assert_eq!(scaled_delay(1200, 0.0), Duration::ZERO);
    }
}
