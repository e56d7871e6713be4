pub mod assign;
pub mod check;
pub mod init;
pub mod settings;
