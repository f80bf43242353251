use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::cache::MetadataCache;
use crate::transcoder::{Skipped, TranscodeConfig, Transcoded};
use crate::TranscodeError;

/// A step of the path of the value being transcoded.
#[derive(Clone, Copy)]
pub(super) enum Segment<'s> {
    Member(&'s str),
    Index(usize),
}

/// State of one transcoding pass, forward or reverse.
///
/// Tracks the nesting depth, the path used in diagnostics, and the
/// members skipped so far.
pub(super) struct Walk<'a> {
    pub(super) cache: &'a MetadataCache,
    config: TranscodeConfig,
    path: String,
    depth: usize,
    skipped: Vec<Skipped>,
}

impl<'a> Walk<'a> {
    #[inline]
    pub(super) fn new(cache: &'a MetadataCache, config: TranscodeConfig) -> Self {
        Self {
            cache,
            config,
            path: String::new(),
            depth: 0,
            skipped: Vec::new(),
        }
    }

    /// Run `f` one level deeper, failing once the depth limit is reached.
    pub(super) fn nested<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, TranscodeError>,
    ) -> Result<R, TranscodeError> {
        if self.depth >= self.config.max_depth() {
            return Err(TranscodeError::DepthExceeded {
                limit: self.config.max_depth(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` with `segment` appended to the diagnostic path.
    pub(super) fn at<R>(&mut self, segment: Segment<'_>, f: impl FnOnce(&mut Self) -> R) -> R {
        let len = self.path.len();
        match segment {
            Segment::Member(name) => {
                if len != 0 {
                    self.path.push('.');
                }
                self.path.push_str(name);
            }
            Segment::Index(index) => {
                // Writing into a `String` cannot fail.
                let _ = write!(self.path, "[{index}]");
            }
        }
        let result = f(self);
        self.path.truncate(len);
        result
    }

    /// Record a failure at the current path and carry on.
    pub(super) fn skip(&mut self, error: TranscodeError) {
        let skipped = Skipped {
            path: self.path.clone(),
            error,
        };
        if self.config.log_skipped() {
            log::warn!("{skipped}");
        }
        self.skipped.push(skipped);
    }

    #[inline]
    pub(super) fn finish<T>(self, value: T) -> Transcoded<T> {
        Transcoded::new(value, self.skipped)
    }
}
