//! # Wirebox
//!
//! A minimal string-identified dependency injection container with
//! descriptor-based autowiring.
//!
//! Services are registered under string identifiers, each mapped to a
//! [`Recipe`] (type reference, factory closure, pre-built instance or raw
//! value). Constructible types additionally register a [`ClassDefinition`]
//! describing their constructor arguments, which the resolution engine walks
//! recursively. Every identifier resolves to a single shared instance for the
//! lifetime of the container.
//!
//! Configuration scalars live in a separate parameter namespace, addressed by
//! `%name%` tokens or parameter-bound constructor arguments.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use wirebox::{ClassDefinition, Container};
//!
//! struct Transport {
//!     host: String,
//!     timeout: u64,
//! }
//!
//! struct Mailer {
//!     transport: Arc<Transport>,
//! }
//!
//! let mut container = Container::new();
//! container.set_parameter("smtp_host", "mail.example.com".to_string());
//! container.define(
//!     ClassDefinition::builder("app.transport")
//!         .parameter("smtp_host")
//!         .default_value(30u64)
//!         .constructor(|args| {
//!             Ok(Transport {
//!                 host: args.value(0)?,
//!                 timeout: args.value(1)?,
//!             })
//!         }),
//! );
//! container.define(
//!     ClassDefinition::builder("app.mailer")
//!         .depends_on("app.transport")
//!         .constructor(|args| {
//!             Ok(Mailer {
//!                 transport: args.get(0)?,
//!             })
//!         }),
//! );
//!
//! let mailer = container.get_as::<Mailer>("app.mailer").unwrap();
//! assert_eq!(mailer.transport.host, "mail.example.com");
//! assert_eq!(mailer.transport.timeout, 30);
//!
//! // Resolution is memoized: the same instance every time.
//! let again = container.get_as::<Mailer>("app.mailer").unwrap();
//! assert!(Arc::ptr_eq(&mailer, &again));
//! ```

mod builder;
mod cache;
mod container;
mod definition;
mod error;
mod ident;
mod parameters;
mod recipe;
mod registry;

pub use builder::ContainerBuilder;
pub use cache::InstanceCache;
pub use container::Container;
pub use definition::{ClassDefinition, DefinitionBuilder, Dependency, Injectable, ResolvedArgs};
pub use error::{Result, WireboxError};
pub use ident::{Identifier, ParameterId, ServiceId};
pub use parameters::ParameterStore;
pub use recipe::{FactoryFn, Instance, Recipe};
pub use registry::ServiceRegistry;

/// Prelude module for convenient imports
///
/// ```
/// use wirebox::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ClassDefinition, Container, ContainerBuilder, Dependency, Injectable, Instance, Recipe,
        Result, WireboxError,
    };
    pub use std::sync::Arc;
}
