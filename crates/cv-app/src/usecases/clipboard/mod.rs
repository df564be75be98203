pub mod capture_clipboard;
pub mod copy_item_to_system_clipboard;
pub mod hash_lock;

pub use capture_clipboard::{CaptureClipboardUseCase, CaptureOutcome};
pub use copy_item_to_system_clipboard::CopyItemToSystemClipboard;
pub use hash_lock::{HashLockGuard, HashLocks};
