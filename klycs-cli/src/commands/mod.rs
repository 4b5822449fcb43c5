pub mod agenda;
pub mod delete;
pub mod export;
pub mod init;
pub mod new;
