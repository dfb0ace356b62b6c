//! User-visible notification plumbing.
//!
//! The notification sink is consumed fire-and-forget: the orchestrator emits
//! exactly one notice per terminal outcome and never waits for delivery or
//! acknowledgment.

use tokio::sync::mpsc;
use tracing::warn;

/// Default buffer size for the notice channel.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    /// Emit a notice. Fire-and-forget, no acknowledgment required.
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Sender handle for notices.
pub type NoticeSender = mpsc::Sender<Notice>;
/// Receiver handle for notices.
pub type NoticeReceiver = mpsc::Receiver<Notice>;

/// Create a new notice channel.
///
/// Returns a channel-backed [`Notifier`] and the receiver the shell drains
/// to render notices.
pub fn notice_channel() -> (ChannelNotifier, NoticeReceiver) {
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_BUFFER);
    (ChannelNotifier { tx }, rx)
}

/// Channel-backed [`Notifier`].
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: NoticeSender,
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        let notice = Notice {
            message: message.to_string(),
            kind,
        };
        if self.tx.try_send(notice).is_err() {
            warn!(message, "notice dropped, channel full or closed");
        }
    }
}
