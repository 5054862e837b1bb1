pub mod api;
mod entry;
pub mod resource_router;

pub use entry::{app, router};
pub use resource_router::ResourceRouter;
