//! Presenter (handler) subsystem.
//!
//! # Data Flow
//! ```text
//! winning Params { presenter, action, signal }
//!     → factory.rs (identifier → class name → PresenterClass)
//!     → class.rs (declared method table)
//!     → resolver.rs (signal / action / render method selection)
//!     → SourceReference (class or class::method)
//! ```

pub mod class;
pub mod factory;
pub mod resolver;

pub use class::{PresenterClass, PresenterKind};
pub use factory::{PresenterError, PresenterFactory, PresenterRegistry};
pub use resolver::{resolve, SourceReference};
