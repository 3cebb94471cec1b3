use std::sync::Arc;

use crate::data::options::FetchPhase;

/// Side-channel callback receiving byte counts during a download.
pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Snapshot of a download passed to the progress callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub phase: FetchPhase,

    /// Bytes present in the cache file, including a resumed prefix.
    pub bytes_downloaded: u64,

    /// Expected final size of the cache file.
    pub total_bytes: Option<u64>,

    /// Current retry attempt (0 = first attempt).
    pub retry_count: u32,
}

impl Progress {
    /// Returns `None` if `total_bytes` is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                if self.is_completed() { 100.0 } else { 0.0 }
            } else {
                (self.bytes_downloaded as f64 / total as f64) * 100.0
            }
        })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool { self.phase == FetchPhase::Completed }

    #[must_use]
    pub fn is_retrying(&self) -> bool { self.retry_count > 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_known_total() {
        let p = Progress {
            phase: FetchPhase::Downloading,
            bytes_downloaded: 25,
            total_bytes: Some(100),
            retry_count: 0,
        };
        assert_eq!(p.percentage(), Some(25.0));
        assert!(!p.is_retrying());
    }

    #[test]
    fn empty_file_is_complete_only_when_done() {
        let mut p = Progress {
            phase: FetchPhase::Downloading,
            bytes_downloaded: 0,
            total_bytes: Some(0),
            retry_count: 1,
        };
        assert_eq!(p.percentage(), Some(0.0));
        p.phase = FetchPhase::Completed;
        assert_eq!(p.percentage(), Some(100.0));
        assert!(p.is_retrying());
    }
}
