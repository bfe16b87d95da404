//! Live values substituted into note text: `{Weather.temp}`, `{Time.day}`,
//! `{Encode(...)}` and the rest of the module registry.

pub mod key;
pub mod resolver;

pub use key::ModuleKey;
pub use resolver::{referenced_keys, ModuleResolver, ModuleValue, ResolvedModules};
