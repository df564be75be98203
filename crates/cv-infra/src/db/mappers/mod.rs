pub mod clipboard_item_mapper;

pub use clipboard_item_mapper::ClipboardItemRowMapper;
