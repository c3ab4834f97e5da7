//! Role-polymorphic profile resolution.
//!
//! Three independent surfaces (avatar menu, profile viewer, settings) need
//! the same answer to "who is this account?". They all go through one
//! [`ProfileResolver`], which dispatches on the closed [`clove_core::Role`]
//! enum, fetches the role-specific upstream shape, and hands it to the pure
//! [`normalize`] mapping. The result is always a fully populated
//! [`clove_core::Profile`]; upstream trouble degrades to defaults, never to
//! an error the UI has to handle.

mod normalizer;
mod resolver;

pub use normalizer::normalize;
pub use resolver::ProfileResolver;
