//! Camera, projection and the cursor parallax controller.
//!
//! The camera always looks at the origin. Its x/y position eases toward a
//! target derived from the cursor offset (the parallax), its z stays where it
//! started. Projection uses the container's aspect ratio and is rebuilt on
//! every resize.

use std::sync::{Arc, Mutex};

use cgmath::{EuclideanSpace, Point3, Rad, Vector3};
use winit::{
    dpi::{LogicalPosition, LogicalSize, PhysicalPosition},
    event::WindowEvent,
};

use crate::config::{CameraConfig, MotionConfig};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Aspect ratio of a surface, with both sides clamped to at least one pixel.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    up: Vector3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P) -> Self {
        Self {
            position: position.into(),
            target: Point3::origin(),
            up: Vector3::unit_y(),
        }
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::look_at_rh(self.position, self.target, self.up)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self::new(
            width,
            height,
            cgmath::Deg(config.fovy_deg),
            config.znear,
            config.zfar,
        )
    }

    /// Updates the aspect ratio. Zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = aspect_ratio(width, height);
        true
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Size of the rendering surface in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Applies a new size. Returns `false` (and keeps the old size) when
    /// either side is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn half_extents(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.width, self.height)
    }
}

/// Normalised pointer displacement from the viewport centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorOffset {
    pub x: f32,
    pub y: f32,
}

/// Offset of a pointer at `(x, y)` from the centre given by `half_extents`.
/// Position and extents must be in the same unit (logical pixels).
pub fn pointer_offset(x: f32, y: f32, half_extents: (f32, f32), sensitivity: f32) -> CursorOffset {
    let (half_width, half_height) = half_extents;
    CursorOffset {
        x: (x - half_width) * sensitivity,
        y: (y - half_height) * sensitivity,
    }
}

/// Logical size of the element hosting the scene, `None` while it has no
/// layout box.
pub fn container_extent(width: i32, height: i32) -> Option<LogicalSize<u32>> {
    (width > 0 && height > 0).then(|| LogicalSize::new(width as u32, height as u32))
}

/// Latest cursor offset published from outside the window's event stream.
///
/// On the web the pointer is tracked over the whole document, not only over
/// the canvas, so the page listener publishes here and the controller picks
/// the value up on its next update.
#[derive(Clone, Debug, Default)]
pub struct PointerFeed {
    latest: Arc<Mutex<Option<CursorOffset>>>,
}

impl PointerFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, offset: CursorOffset) {
        match self.latest.lock() {
            Ok(mut latest) => *latest = Some(offset),
            Err(_) => log::warn!("pointer feed poisoned, dropping cursor update"),
        }
    }

    /// Takes the newest offset, if one arrived since the last call.
    pub fn take(&self) -> Option<CursorOffset> {
        self.latest.lock().ok().and_then(|mut latest| latest.take())
    }
}

/// Turns pointer movement into a cursor offset and eases the camera toward
/// the parallax target derived from it.
#[derive(Clone, Debug)]
pub struct ParallaxController {
    cursor: CursorOffset,
    viewport: Viewport,
    scale_factor: f64,
    feed: Option<PointerFeed>,
    sensitivity: f32,
    strength: f32,
    easing: f32,
}

impl ParallaxController {
    /// `viewport` is in physical pixels, `scale_factor` converts them to
    /// logical ones.
    pub fn new(config: &MotionConfig, viewport: Viewport, scale_factor: f64) -> Self {
        Self {
            cursor: CursorOffset::default(),
            viewport,
            scale_factor: 1.0,
            feed: None,
            sensitivity: config.cursor_sensitivity,
            strength: config.parallax_strength,
            easing: config.easing,
        }
        .with_scale_factor(scale_factor)
    }

    /// Reads the cursor from `feed` instead of the window's cursor events.
    pub fn with_feed(mut self, feed: PointerFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.set_scale_factor(scale_factor);
        self
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor)
            }
            WindowEvent::CursorMoved { position, .. } if self.feed.is_none() => {
                self.set_physical_pointer(position.x, position.y)
            }
            WindowEvent::CursorLeft { .. } if self.feed.is_none() => self.clear_pointer(),
            _ => {}
        }
    }

    /// Overwrites the cursor offset from a pointer position in logical pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.cursor = pointer_offset(x, y, self.logical_half_extents(), self.sensitivity);
    }

    /// Overwrites the cursor offset from a pointer position in physical pixels.
    pub fn set_physical_pointer(&mut self, x: f64, y: f64) {
        let logical: LogicalPosition<f32> = PhysicalPosition::new(x, y).to_logical(self.scale_factor);
        self.set_pointer(logical.x, logical.y);
    }

    /// Drops the offset once the pointer has left the window.
    pub fn clear_pointer(&mut self) {
        self.cursor = CursorOffset::default();
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        } else {
            log::warn!("ignoring scale factor {}", scale_factor);
        }
    }

    fn logical_half_extents(&self) -> (f32, f32) {
        let (half_width, half_height) = self.viewport.half_extents();
        let scale = self.scale_factor as f32;
        (half_width / scale, half_height / scale)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    pub fn cursor(&self) -> CursorOffset {
        self.cursor
    }

    /// Where the camera is heading for the current cursor offset.
    pub fn target(&self) -> (f32, f32) {
        (self.cursor.x * self.strength, -self.cursor.y * self.strength)
    }

    /// Moves the camera one easing step toward the target and re-aims it at
    /// the origin.
    pub fn update(&mut self, camera: &mut Camera) {
        if let Some(offset) = self.feed.as_ref().and_then(PointerFeed::take) {
            self.cursor = offset;
        }
        let (target_x, target_y) = self.target();
        camera.position.x += (target_x - camera.position.x) * self.easing;
        camera.position.y += (target_y - camera.position.y) * self.easing;
        camera.look_at(Point3::origin());
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: ParallaxController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
