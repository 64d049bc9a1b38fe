pub mod header;
pub mod toast;
