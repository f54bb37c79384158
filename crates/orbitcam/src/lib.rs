pub mod camera;
pub mod content;
pub mod geometry;
pub mod layout;
pub mod macros;

pub const SOCKET_PATH: &str = "/tmp/orbit.sock";
