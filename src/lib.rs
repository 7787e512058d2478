//! Gesture-to-action translation engine.
//!
//! Converts noisy per-frame hand-pose observations into stable cursor
//! motion and edge-triggered click events, arbitrating with an optional
//! voice command channel over one shared pointer sink.
//!
//! The pipeline per camera frame:
//! 1. [`features`] — pure geometry: finger flags, spread angle, pinches
//! 2. [`motion`] — active-region mapping + exponential smoothing
//! 3. [`gesture`] — edge detection, debouncing, click policies
//! 4. [`arbiter`] — serialized delivery to the output sink
//!
//! Pose estimation, speech-to-text, and OS pointer injection are
//! external collaborators behind the [`capture::PoseSource`],
//! [`voice::SpeechRecognizer`], and [`action::PointerSink`] seams.

pub mod action;
pub mod arbiter;
pub mod capture;
pub mod config;
pub mod engine;
pub mod features;
pub mod gesture;
pub mod landmark;
pub mod motion;
pub mod runtime;
pub mod voice;
