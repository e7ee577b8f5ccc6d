//! Diagnosis Engine - Interactive evidence-accumulation for diagnosis.
//!
//! This crate narrows a fixed set of candidate diagnoses by asking, at each
//! step, the yes/no-style question expected to reduce uncertainty the most.
//! Answers can be retracted one at a time with exact state restoration.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
