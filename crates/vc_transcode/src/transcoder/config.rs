/// Options of a [`Transcoder`](crate::Transcoder).
///
/// # Examples
///
/// ```
/// use vc_transcode::TranscodeConfig;
///
/// let config = TranscodeConfig::new().with_max_depth(8).with_log_skipped(false);
/// assert_eq!(config.max_depth(), 8);
/// assert!(!config.log_skipped());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeConfig {
    max_depth: usize,
    log_skipped: bool,
}

impl TranscodeConfig {
    /// The default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    #[inline]
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            log_skipped: true,
        }
    }

    /// Limit the nesting of values. A member nested deeper is skipped with
    /// [`TranscodeError::DepthExceeded`](crate::TranscodeError::DepthExceeded).
    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether skipped members are logged at `warn` as they happen.
    #[inline]
    pub const fn with_log_skipped(mut self, log_skipped: bool) -> Self {
        self.log_skipped = log_skipped;
        self
    }

    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub const fn log_skipped(&self) -> bool {
        self.log_skipped
    }
}

impl Default for TranscodeConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
