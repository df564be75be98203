mod item_repo;

pub use item_repo::*;
