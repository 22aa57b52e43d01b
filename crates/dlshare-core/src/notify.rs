//! User-visible notices (the transient "toast" of the flow).

use std::io::Write;
use std::sync::Mutex;

/// The three things the user can be told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidUrl,
    DownloadFailed,
    NotAnImage,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::InvalidUrl => "The shared text is not a valid URL.",
            Notice::DownloadFailed => "Could not download the image.",
            Notice::NotAnImage => "The shared link does not point to an image.",
        }
    }
}

/// Shows notices to the user. Never blocks on user input.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Prints notices on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        let _ = writeln!(std::io::stderr().lock(), "dlshare: {}", notice.message());
    }
}

/// Keeps notices in memory; used by tests and embedders that render their own UI.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        let all = [Notice::InvalidUrl, Notice::DownloadFailed, Notice::NotAnImage];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn recording_keeps_order() {
        let n = RecordingNotifier::new();
        n.notify(Notice::NotAnImage);
        n.notify(Notice::InvalidUrl);
        assert_eq!(n.notices(), vec![Notice::NotAnImage, Notice::InvalidUrl]);
    }
}
