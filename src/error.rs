// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidSnapshot { width: usize, height: usize }, // Snapshot had zero area
    DetachedHost,         // Host element has no parent to draw into
    ImageLoad(String),    // Reading/decoding the snapshot image failed
    CameraInit(String),   // Opening/starting the camera failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSnapshot { width, height } => {
                write!(f, "Invalid snapshot: {width}x{height} has no pixels")
            }
            Error::DetachedHost => write!(f, "Host element is not attached to a parent"),
            Error::ImageLoad(s) => write!(f, "Image load error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
