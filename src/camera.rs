// A webcam frame as the element to dissolve.
// Visual expectation: capture() freezes whatever the camera sees right now,
// and that still image is what turns to dust.

use crate::error::Error;
use crate::snapshot::{Snapshot, SnapshotProvider};
use crate::types::RasterBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

pub struct CameraSnapshot {
    index: u32,
    width: u32,
    height: u32,
    origin: (i32, i32),
}

impl CameraSnapshot {
    /// Nothing is opened yet; the device is only touched in `capture`.
    pub fn new(index: u32, width: u32, height: u32, origin: (i32, i32)) -> Self {
        Self { index, width, height, origin }
    }

    fn open(&self) -> Result<Camera, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(self.width, self.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(self.index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;
        Ok(cam)
    }
}

impl SnapshotProvider for CameraSnapshot {
    fn capture(&mut self) -> Result<Snapshot, Error> {
        let mut cam = self.open()?;

        let frame = cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        if let Err(e) = cam.stop_stream() {
            log::warn!("camera stream did not stop cleanly: {e}");
        }

        // Camera pixels are always opaque: 0xFFRRGGBB.
        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                0xFF_00_00_00 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect();

        let buffer = RasterBuffer::new(w as usize, h as usize, pixels)?;
        Ok(Snapshot { buffer, origin: self.origin })
    }
}
