//! Diagnostic logging for the amplifier test.
//!
//! # Architecture
//!
//! ```text
//! main loop             DiagLog              console
//! ─────────             ───────              ───────
//!
//! diag_info!() ──────▶ [L0][L1][L2] ──────▶ UART TX
//! no alloc               fixed ring          drained after
//! formats on stack       owned, no atomics   each step
//! ```
//!
//! # Rules
//!
//! - Messages longer than [`MAX_MSG_LEN`] are truncated
//! - Entries above the configured level are discarded at push time
//! - New messages are dropped (and counted) when the ring is full

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 120;

/// Default ring capacity (number of entries).
pub const LOG_CAPACITY: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds since boot.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    pub const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, lossy on invalid UTF-8 (truncation can split a char).
    pub fn message(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                // Keep the valid prefix
                let valid = &bytes[..e.valid_up_to()];
                core::str::from_utf8(valid).unwrap_or("")
            }
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogEntry")
            .field("timestamp_us", &self.timestamp_us)
            .field("level", &self.level)
            .field("msg", &self.message())
            .finish()
    }
}

/// Fixed-capacity diagnostic log ring.
///
/// Owned by the single thread of control; push and drain take `&mut self`.
pub struct DiagLog<const N: usize = LOG_CAPACITY> {
    entries: [LogEntry; N],
    write_idx: usize,
    read_idx: usize,
    dropped: u32,
    max_level: LogLevel,
}

impl<const N: usize> DiagLog<N> {
    /// Create an empty log that keeps everything up to `Info`.
    pub const fn new() -> Self {
        Self::with_level(LogLevel::Info)
    }

    /// Create an empty log that keeps entries up to `max_level`.
    pub const fn with_level(max_level: LogLevel) -> Self {
        assert!(N > 0, "Log capacity must be non-zero");

        Self {
            entries: [LogEntry::EMPTY; N],
            write_idx: 0,
            read_idx: 0,
            dropped: 0,
            max_level,
        }
    }

    /// Check whether `level` would be recorded.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    /// Push a log entry.
    ///
    /// Returns `true` if queued, `false` if filtered out or dropped (ring full).
    pub fn push(&mut self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        if !self.enabled(level) {
            return false;
        }

        if self.pending() >= N {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }

        let entry = &mut self.entries[self.write_idx % N];
        entry.timestamp_us = timestamp_us;
        entry.level = level;
        entry.len = msg.len().min(MAX_MSG_LEN) as u8;
        entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);

        self.write_idx = self.write_idx.wrapping_add(1);
        true
    }

    /// Drain the oldest entry.
    pub fn drain(&mut self) -> Option<LogEntry> {
        if self.read_idx == self.write_idx {
            return None;
        }

        let entry = self.entries[self.read_idx % N];
        self.read_idx = self.read_idx.wrapping_add(1);
        Some(entry)
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> usize {
        self.write_idx.wrapping_sub(self.read_idx)
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() > 0
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&mut self) {
        self.dropped = 0;
    }
}

impl<const N: usize> Default for DiagLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Log macro.
///
/// # Example
///
/// ```ignore
/// diag_log!(log, LogLevel::Info, now_us(), "I2S up @ {} Hz", rate);
/// ```
#[macro_export]
macro_rules! diag_log {
    ($log:expr, $level:expr, $timestamp:expr, $($arg:tt)*) => {{
        let level = $level;
        if $log.enabled(level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $log.push($timestamp, level, &buf[..len])
        } else {
            false
        }
    }};
}

/// Error log.
#[macro_export]
macro_rules! diag_error {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::diag_log!($log, $crate::logging::LogLevel::Error, $timestamp, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! diag_warn {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::diag_log!($log, $crate::logging::LogLevel::Warn, $timestamp, $($arg)*)
    };
}

/// Info log.
#[macro_export]
macro_rules! diag_info {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::diag_log!($log, $crate::logging::LogLevel::Info, $timestamp, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! diag_debug {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::diag_log!($log, $crate::logging::LogLevel::Debug, $timestamp, $($arg)*)
    };
}

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
#[inline]
pub fn now_us() -> i64 {
    // SAFETY: esp_timer_get_time is always safe to call after boot
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// Host stand-in, always 0.
#[cfg(not(target_os = "espidf"))]
#[inline]
pub fn now_us() -> i64 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_basic() {
        let mut log = DiagLog::<16>::new();

        assert!(log.push(1000, LogLevel::Info, b"test message"));
        assert!(log.has_entries());
        assert_eq!(log.pending(), 1);

        let entry = log.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message(), "test message");

        assert!(!log.has_entries());
        assert!(log.drain().is_none());
    }

    #[test]
    fn test_log_full_drops_new() {
        let mut log = DiagLog::<4>::new();

        assert!(log.push(1, LogLevel::Info, b"1"));
        assert!(log.push(2, LogLevel::Info, b"2"));
        assert!(log.push(3, LogLevel::Info, b"3"));
        assert!(log.push(4, LogLevel::Info, b"4"));

        // Should drop
        assert!(!log.push(5, LogLevel::Info, b"5"));
        assert_eq!(log.dropped(), 1);

        // Oldest survives
        assert_eq!(log.drain().unwrap().message(), "1");
        assert!(log.push(6, LogLevel::Info, b"6"));

        let rest: Vec<_> = core::iter::from_fn(|| log.drain()).map(|e| e.timestamp_us).collect();
        assert_eq!(rest, vec![2, 3, 4, 6]);

        log.reset_dropped();
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn test_level_filter() {
        let mut log = DiagLog::<8>::with_level(LogLevel::Warn);

        assert!(!log.push(0, LogLevel::Info, b"quiet"));
        assert!(log.push(0, LogLevel::Warn, b"warn"));
        assert!(log.push(0, LogLevel::Error, b"err"));
        assert_eq!(log.pending(), 2);
        assert_eq!(log.dropped(), 0, "Filtered entries are not drops");

        let mut verbose = DiagLog::<8>::with_level(LogLevel::Debug);
        assert!(verbose.push(0, LogLevel::Debug, b"dbg"));
    }

    #[test]
    fn test_message_truncated() {
        let mut log = DiagLog::<2>::new();
        let long = [b'x'; MAX_MSG_LEN + 20];
        log.push(0, LogLevel::Info, &long);
        let entry = log.drain().unwrap();
        assert_eq!(entry.len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_message_split_utf8() {
        let mut entry = LogEntry::EMPTY;
        let text = "ok ✓".as_bytes();
        // Cut inside the 3-byte check mark
        entry.len = (text.len() - 1) as u8;
        entry.msg[..text.len()].copy_from_slice(text);
        assert_eq!(entry.message(), "ok ");
    }

    #[test]
    fn test_format_to_buffer() {
        let mut buf = [0u8; 32];
        let len = format_to_buffer(&mut buf, format_args!("Hello {}", 42));
        assert_eq!(&buf[..len], b"Hello 42");

        let mut small = [0u8; 4];
        let len = format_to_buffer(&mut small, format_args!("truncated"));
        assert_eq!(&small[..len], b"trun");
    }

    #[test]
    fn test_macros() {
        let mut log = DiagLog::<8>::new();
        assert!(crate::diag_info!(log, 10, "rate {} Hz", 44_100));
        assert!(crate::diag_error!(log, 20, "code {}", -1));
        assert!(!crate::diag_debug!(log, 30, "filtered"));

        let e = log.drain().unwrap();
        assert_eq!(e.message(), "rate 44100 Hz");
        let e = log.drain().unwrap();
        assert_eq!(e.level, LogLevel::Error);
        assert!(log.drain().is_none());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }
}
