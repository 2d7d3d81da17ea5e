pub mod init;
pub mod keys;
pub mod run;
