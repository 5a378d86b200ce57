//! Serial camera adapters

mod camera;
mod uart;

pub use camera::SerialCamera;
pub use uart::{SerialPortLink, POLL_TIMEOUT};
