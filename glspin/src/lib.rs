//! GL independent half of the demos: transforms, animation, geometry and
//! the demo scenes themselves.

pub mod animation;
pub mod config;
pub mod light;
pub mod mesh;
pub mod scene;
pub mod stats;
pub mod transform;

pub use scene::{Demo, DemoScene};
