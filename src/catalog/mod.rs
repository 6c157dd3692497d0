//! Tool catalog: descriptors, the built-in tool list, and filters.
//!
//! # Example
//!
//! ```
//! use arsenal::catalog::{Catalog, ToolFilter};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let filter = ToolFilter { critical_only: true, ..Default::default() };
//! let critical = filter.apply(&catalog).unwrap();
//! assert!(critical.iter().all(|t| t.critical));
//! ```

pub mod builtin;
pub mod descriptor;
pub mod filter;
pub mod registry;

pub use builtin::{builtin_tools, curl_install_command};
pub use descriptor::{parse_size_mb, InstallSpec, InstallType, Platform, ToolDescriptor};
pub use filter::{essential_tools, ToolFilter};
pub use registry::Catalog;
