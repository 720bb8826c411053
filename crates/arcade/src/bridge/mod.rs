pub mod protocol;
pub mod view;
