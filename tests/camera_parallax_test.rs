use approx::assert_abs_diff_eq;
use engine_showcase::{
    camera::{
        Camera, CursorOffset, ParallaxController, PointerFeed, Projection, Viewport, aspect_ratio,
        container_extent,
    },
    config::{CameraConfig, MotionConfig},
    context::apply_surface_size,
};

#[test]
fn should_follow_the_container_size() {
    let mut viewport = Viewport::new(800, 600);
    let mut projection = Projection::from_config(&CameraConfig::default(), 800, 600);

    assert!(viewport.resize(400, 300));
    assert!(projection.resize(400, 300));

    assert_abs_diff_eq!(viewport.aspect(), 400.0 / 300.0);
    assert_abs_diff_eq!(projection.aspect(), 400.0 / 300.0);
    assert_eq!(viewport.half_extents(), (200.0, 150.0));
}

#[test]
fn should_ignore_zero_sized_resizes() {
    let mut viewport = Viewport::new(800, 600);
    let mut projection = Projection::from_config(&CameraConfig::default(), 800, 600);

    assert!(!viewport.resize(0, 300));
    assert!(!viewport.resize(400, 0));
    assert!(!projection.resize(0, 0));

    assert_eq!(viewport, Viewport::new(800, 600));
    assert_abs_diff_eq!(projection.aspect(), 800.0 / 600.0);
    assert_abs_diff_eq!(aspect_ratio(0, 0), 1.0);
}

#[test]
fn should_derive_the_cursor_offset_from_the_viewport_centre() {
    let mut controller = ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0);

    controller.set_pointer(600.0, 100.0);

    let cursor = controller.cursor();
    assert_abs_diff_eq!(cursor.x, 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(cursor.y, -0.1, epsilon = 1e-6);
    let (target_x, target_y) = controller.target();
    assert_abs_diff_eq!(target_x, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(target_y, 1.0, epsilon = 1e-5);
}

#[test]
fn should_centre_the_cursor_when_the_pointer_is_in_the_middle() {
    let mut controller = ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0);
    controller.set_pointer(400.0, 300.0);
    assert_eq!(controller.cursor().x, 0.0);
    assert_eq!(controller.cursor().y, 0.0);
}

#[test]
fn should_ease_the_camera_toward_the_parallax_target() {
    let mut controller = ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0);
    let mut camera = Camera::new([0.0, 0.0, 50.0]);
    controller.set_pointer(600.0, 100.0);

    controller.update(&mut camera);
    assert_abs_diff_eq!(camera.position.x, 0.05, epsilon = 1e-5);
    assert_abs_diff_eq!(camera.position.y, 0.05, epsilon = 1e-5);

    let mut previous = camera.position.x;
    for _ in 0..500 {
        controller.update(&mut camera);
        assert!(camera.position.x >= previous);
        previous = camera.position.x;
    }

    assert_abs_diff_eq!(camera.position.x, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(camera.position.y, 1.0, epsilon = 1e-3);
    assert_eq!(camera.position.z, 50.0);
    assert_eq!(camera.target, cgmath::Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn should_use_the_new_centre_after_a_resize() {
    let mut controller = ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0);
    controller.resize(400, 300);

    controller.set_pointer(200.0, 150.0);
    assert_eq!(controller.cursor().x, 0.0);
    assert_eq!(controller.cursor().y, 0.0);

    controller.resize(0, 0);
    controller.set_pointer(200.0, 150.0);
    assert_eq!(controller.cursor().x, 0.0);
}

#[test]
fn should_default_to_the_landing_page_camera() {
    let config = CameraConfig::default();
    assert_eq!(config.fovy_deg, 75.0);
    assert_eq!(config.znear, 1.0);
    assert_eq!(config.zfar, 1000.0);
    assert_eq!(config.position, [0.0, 0.0, 50.0]);
}

#[test]
fn should_measure_the_cursor_in_logical_pixels_on_high_density_displays() {
    // 800x600 CSS pixels at a device pixel ratio of 2.
    let mut controller =
        ParallaxController::new(&MotionConfig::default(), Viewport::new(1600, 1200), 2.0);

    controller.set_physical_pointer(1200.0, 200.0);

    let cursor = controller.cursor();
    assert_abs_diff_eq!(cursor.x, 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(cursor.y, -0.1, epsilon = 1e-6);
}

#[test]
fn should_follow_a_scale_factor_change() {
    let mut controller =
        ParallaxController::new(&MotionConfig::default(), Viewport::new(1600, 1200), 1.0);
    controller.set_scale_factor(2.0);
    controller.set_physical_pointer(1600.0, 1200.0);
    assert_abs_diff_eq!(controller.cursor().x, 0.2, epsilon = 1e-6);

    controller.set_scale_factor(0.0);
    controller.set_physical_pointer(1600.0, 1200.0);
    assert_abs_diff_eq!(controller.cursor().x, 0.2, epsilon = 1e-6);
}

#[test]
fn should_reset_the_cursor_once_the_pointer_leaves() {
    let mut controller =
        ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0);
    controller.set_pointer(600.0, 100.0);

    controller.clear_pointer();

    assert_eq!(controller.cursor(), CursorOffset::default());
    assert_eq!(controller.target(), (0.0, 0.0));
}

#[test]
fn should_take_the_cursor_from_the_page_pointer_feed() {
    let feed = PointerFeed::new();
    let mut controller =
        ParallaxController::new(&MotionConfig::default(), Viewport::new(800, 600), 1.0)
            .with_feed(feed.clone());
    let mut camera = Camera::new([0.0, 0.0, 50.0]);

    feed.publish(CursorOffset { x: 0.1, y: -0.1 });
    controller.update(&mut camera);

    assert_eq!(controller.cursor(), CursorOffset { x: 0.1, y: -0.1 });
    assert!(feed.take().is_none());

    // Without a new publish the last offset sticks.
    controller.update(&mut camera);
    assert_eq!(controller.cursor(), CursorOffset { x: 0.1, y: -0.1 });
}

#[test]
fn should_size_the_window_from_the_container() {
    let size = container_extent(1024, 640).map(|size| (size.width, size.height));
    assert_eq!(size, Some((1024, 640)));
    assert!(container_extent(0, 640).is_none());
    assert!(container_extent(1024, -1).is_none());
}

fn surface_config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Bgra8UnormSrgb,
        width,
        height,
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

#[test]
fn should_resize_the_surface_to_exactly_the_new_dimensions() {
    let mut config = surface_config(800, 600);

    assert!(apply_surface_size(&mut config, 400, 300));

    assert_eq!((config.width, config.height), (400, 300));
}

#[test]
fn should_keep_the_surface_size_on_a_zero_sized_resize() {
    let mut config = surface_config(800, 600);

    assert!(!apply_surface_size(&mut config, 0, 300));
    assert!(!apply_surface_size(&mut config, 400, 0));

    assert_eq!((config.width, config.height), (800, 600));
}
