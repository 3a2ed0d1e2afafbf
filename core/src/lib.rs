//! Core library for the aura wellness tracker: models, database, and
//! service layer. The CLI crate is a thin shell over [`service::AuraService`].

pub mod csv_import;
pub mod db;
pub mod models;
pub mod service;
