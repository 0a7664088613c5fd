//! Use cases orchestrating the consultation flow

pub mod attach_file;
pub mod run_consultation;
