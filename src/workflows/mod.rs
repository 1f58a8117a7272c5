//! End-to-end page workflows built on the form model

pub mod password;
