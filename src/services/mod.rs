//! Domain services: the data operations behind each view.
//!
//! Every function takes a [`DocumentStore`](crate::store::DocumentStore)
//! implementation, performs one user action's worth of reads/writes, and
//! propagates store failures to the caller. Rendering is someone else's job.

pub mod bills;
pub mod dashboard;
pub mod diets;
pub mod members;
pub mod notifications;
pub mod records;
pub mod supplements;
