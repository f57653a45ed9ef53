use gpui::{px, Bounds, Point, Size};
use gpui_split_chart::scales::ChartScale;
use gpui_split_chart::transform::{apply_matrix, PlotTransform};

#[test]
fn test_chart_scale_linear() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));

    assert_eq!(scale.map(0.0), 0.0);
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(100.0), 500.0);

    assert_eq!(scale.invert(0.0), 0.0);
    assert_eq!(scale.invert(250.0), 50.0);
    assert_eq!(scale.invert(500.0), 100.0);
}

#[test]
fn test_plot_transform() {
    let x_scale = ChartScale::new_linear((0.0, 100.0), (0.0, 200.0));
    let y_scale = ChartScale::new_linear((0.0, 100.0), (200.0, 0.0));

    let bounds = Bounds::new(
        Point::new(px(0.0), px(0.0)),
        Size::new(px(200.0), px(200.0)),
    );
    let transform = PlotTransform::new(x_scale, y_scale, bounds);

    // Test Data -> Screen
    let p_data_origin = Point::new(0.0, 0.0);
    let p_screen_origin = transform.data_to_screen(p_data_origin);
    assert_eq!(p_screen_origin.x, px(0.0));
    assert_eq!(p_screen_origin.y, px(200.0));

    let p_data_center = Point::new(50.0, 50.0);
    let p_screen_center = transform.data_to_screen(p_data_center);
    assert_eq!(p_screen_center.x, px(100.0));
    assert_eq!(p_screen_center.y, px(100.0));

    // Test Screen -> Data
    let p_restored = transform.screen_to_data(p_screen_center);
    assert!((p_restored.x - 50.0).abs() < 0.001);
    assert!((p_restored.y - 50.0).abs() < 0.001);
}

#[test]
fn test_matrix_matches_scales_with_offset_origin() {
    let bounds = Bounds::new(
        Point::new(px(40.0), px(25.0)),
        Size::new(px(400.0), px(300.0)),
    );
    let transform = PlotTransform::for_domains((-10.0, 30.0), (5.0, 65.0), bounds);
    let matrix = transform.value_to_pixel_matrix();

    for (x, y) in [(-10.0, 5.0), (0.0, 20.0), (12.5, 47.0), (30.0, 65.0)] {
        let via_scales = transform.data_to_screen(Point::new(x, y));
        let via_matrix = apply_matrix(&matrix, x, y);
        assert!((f32::from(via_scales.x) - f32::from(via_matrix.x)).abs() < 0.01);
        assert!((f32::from(via_scales.y) - f32::from(via_matrix.y)).abs() < 0.01);
    }
}

#[test]
fn test_phase_flattens_towards_zero() {
    let bounds = Bounds::new(
        Point::new(px(0.0), px(0.0)),
        Size::new(px(100.0), px(100.0)),
    );
    let transform = PlotTransform::for_domains((0.0, 10.0), (0.0, 10.0), bounds);
    let full = transform.value_to_pixel(5.0, 10.0, 1.0);
    let half = transform.value_to_pixel(5.0, 10.0, 0.5);
    assert_eq!(full.y, px(0.0));
    assert_eq!(half.y, px(50.0));
    assert!(transform.is_in_bounds(full));
    assert!(!transform.is_in_bounds(Point::new(px(101.0), px(50.0))));
}
