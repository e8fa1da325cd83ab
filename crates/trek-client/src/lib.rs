//! Client for the trekking risk-prediction service.
//!
//! A location goes through [`input::collect`], is submitted by the
//! [`orchestrator::Orchestrator`] over a [`transport::PredictionTransport`],
//! and the reply is turned into an [`render::Assessment`] or an error message.

pub mod config;
pub mod input;
pub mod logging;
pub mod orchestrator;
pub mod present;
pub mod render;
pub mod transport;

pub use orchestrator::{
    InteractionState, Orchestrator, Snapshot, SubmitFailure, SubmitOutcome, View,
};
pub use render::Assessment;
