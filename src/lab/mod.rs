pub mod algorithms;
pub mod edit_dialog;
pub mod editor;
pub mod player;
pub mod session;
