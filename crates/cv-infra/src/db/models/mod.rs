pub mod clipboard_item_row;

pub use clipboard_item_row::{ClipboardItemRow, NewClipboardItemRow};
