//! Rendering hand-off
//!
//! The simulation does not draw. Each frame it produces a [`FrameData`] and
//! passes it to a [`RenderBackend`]; GPU resources, shaders and draw
//! submission live behind that trait. [`RecordingBackend`] keeps frames in
//! memory for headless runs and tests.

pub mod frame_data;

pub use frame_data::{CameraUniforms, DrawItem, FrameData, ObjectUniforms};

use std::collections::VecDeque;

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors reported by a rendering backend
#[derive(Error, Debug)]
pub enum RenderError {
    /// Backend could not be brought up
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame could not be submitted
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Backend-specific error
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Consumer of per-frame draw data
pub trait RenderBackend {
    /// Current drawable size in pixels
    fn extent(&self) -> (u32, u32);

    /// Draw one frame. Items arrive nearest first.
    fn submit_frame(&mut self, frame: &FrameData) -> BackendResult<()>;

    /// Drawable was resized
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Aspect ratio of the drawable, 1.0 when it has no area
    #[allow(clippy::cast_precision_loss)]
    fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.extent();
        if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}

/// Summary of a recorded frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    /// Frame number
    pub frame_index: u64,
    /// Camera block as uploaded
    pub camera: CameraUniforms,
    /// Object blocks in draw order
    pub objects: Vec<ObjectUniforms>,
}

/// Headless backend that stores the most recent frames
#[derive(Debug)]
pub struct RecordingBackend {
    width: u32,
    height: u32,
    capacity: usize,
    frames: VecDeque<RecordedFrame>,
    submitted: u64,
}

impl RecordingBackend {
    /// Backend of the given size keeping at most `capacity` frames
    pub fn new(width: u32, height: u32, capacity: usize) -> Self {
        log::info!("Recording backend created ({width}x{height}, keeping {capacity} frames)");
        Self {
            width,
            height,
            capacity: capacity.max(1),
            frames: VecDeque::with_capacity(capacity.max(1)),
            submitted: 0,
        }
    }

    /// Retained frames, oldest first
    pub fn frames(&self) -> &VecDeque<RecordedFrame> {
        &self.frames
    }

    /// Most recent frame
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.back()
    }

    /// Frames submitted since creation
    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl RenderBackend for RecordingBackend {
    fn extent(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn submit_frame(&mut self, frame: &FrameData) -> BackendResult<()> {
        if frame.frame_index <= self.frames.back().map_or(0, |last| last.frame_index) {
            return Err(RenderError::RenderingFailed(format!(
                "frame {} submitted out of order",
                frame.frame_index
            )));
        }

        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(RecordedFrame {
            frame_index: frame.frame_index,
            camera: frame.camera_uniforms(),
            objects: frame.object_uniforms(),
        });
        self.submitted += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        log::debug!("Recording backend resized to {width}x{height}");
        self.width = width;
        self.height = height;
        Ok(())
    }
}
