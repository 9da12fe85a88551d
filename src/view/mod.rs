pub mod cursor;
pub mod nearest;
pub mod viewport;
