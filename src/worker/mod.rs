pub mod capture;
pub mod command;
pub mod worker;
