//! GitHub resource types and the request descriptors that fetch them.

mod branch;
mod content;
mod file;
mod github_error;
mod id;
mod issue;
mod release;
mod repository;
mod sha;
mod tree;
mod user;

pub use branch::*;
pub use content::{Content, ContentFile, ContentType};
pub use file::*;
pub use github_error::*;
pub use id::*;
pub use issue::*;
pub use release::*;
pub use repository::*;
pub use sha::*;
pub use tree::*;
pub use user::*;
