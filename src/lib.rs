pub mod annotation;
pub mod binder;
pub mod class;
pub mod coerce;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod handlers;
pub mod instances;
pub mod pipeline;
pub mod source;
pub mod stage;
pub mod testing;

pub use binder::{Options, attach, bind};
pub use error::Error;

#[cfg(feature = "remora-tracing")]
pub mod tracing;
