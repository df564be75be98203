//! Platform adapters for Clipvault: the system clipboard monitor and the
//! application directory resolver.

pub mod app_dirs;
pub mod clipboard;
pub mod monitor;

pub use app_dirs::DirsAppDirsAdapter;
pub use monitor::SystemClipboardMonitor;
