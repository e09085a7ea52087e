//! Named JSON project records.
//!
//! A project is saved as `<projects_dir>/<name>.json`, where the name is
//! lowercased with spaces replaced by underscores. The record itself is a
//! placeholder: [`ProjectData`] is an empty JSON object unless the caller
//! supplies fields.
//!
//! # Example
//!
//! ```no_run
//! use mesh_project::{ProjectData, ProjectStore};
//!
//! let store = ProjectStore::open("projects").unwrap();
//! let path = store.save("My Robot", &ProjectData::new()).unwrap();
//! assert!(path.ends_with("my_robot.json"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod store;

pub use error::{ProjectError, ProjectResult};
pub use store::{ProjectData, ProjectStore, project_file_name};
