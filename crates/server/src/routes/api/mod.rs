pub mod health;
pub mod root;
mod router;

pub use router::{RESOURCES, router};
