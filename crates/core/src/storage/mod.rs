pub mod format;
pub mod local;
pub mod remote;
