//! HTTP surface for the recommendation service

pub mod rest;

pub use rest::{ApiState, RestApi};
