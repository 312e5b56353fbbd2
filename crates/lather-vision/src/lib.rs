//! # lather-vision
//!
//! Decides from a single photo whether it shows someone showering.
//!
//! The pipeline behind [`ImageClassifier::classify`]:
//! 1. decode the photo and downscale it ([`prepare`])
//! 2. re-encode as JPEG, lowering quality until it fits the byte budget
//! 3. send it with a two-answer prompt to a [`VisionBackend`]
//! 4. map the free-text reply to a [`Verdict`] ([`interpret_response`])
//! 5. on a positive verdict, record today in the [`EventLedger`]
//!
//! The vendor call sits behind [`VisionBackend`]; [`MessagesBackend`] speaks
//! a messages-style JSON API over `reqwest`.
//!
//! [`Verdict`]: lather_core::Verdict
//! [`EventLedger`]: lather_ledger::EventLedger

pub mod backend;
mod classifier;
mod error;
mod interpret;
pub mod prepare;

pub use backend::{MessagesBackend, VisionBackend, VisionRequest};
pub use classifier::ImageClassifier;
pub use error::ClassifierError;
pub use interpret::interpret_response;
pub use prepare::{ImageLimits, PreparedImage, prepare};
