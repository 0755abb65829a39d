use zenride_icon::geometry::{mirror_x, PerspectiveParams, PineSpec, ScenePoint, Side};
use zenride_icon::scene::DashSpec;
use zenride_icon::{Canvas, Color, SceneConfig, SceneError};

fn assert_close(a: ScenePoint, b: ScenePoint) {
    assert!(
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3,
        "expected {:?} to equal {:?}",
        a,
        b
    );
}

fn dash_spec(count: u32, fill_fraction: f32) -> DashSpec {
    DashSpec {
        count,
        fill_fraction,
        width_fraction: 0.04,
        color: Color::WHITE,
    }
}

#[test]
fn test_road_trapezoid_corners() {
    // 1024 canvas, horizon at 512, 22px half-width at the horizon, 308 at the bottom.
    let view = PerspectiveParams::new(1024, 1024, 512.0, 22.0, 308.0).unwrap();
    let [top_left, top_right, bottom_right, bottom_left] = view.road_trapezoid();

    assert_close(top_left, ScenePoint::new(512.0 - 22.0, 512.0));
    assert_close(top_right, ScenePoint::new(512.0 + 22.0, 512.0));
    assert_close(bottom_right, ScenePoint::new(512.0 + 308.0, 1024.0));
    assert_close(bottom_left, ScenePoint::new(512.0 - 308.0, 1024.0));
}

#[test]
fn test_road_width_interpolates_with_depth() {
    let view = PerspectiveParams::new(1024, 1024, 512.0, 22.0, 308.0).unwrap();
    assert!((view.road_half_width_at(512.0) - 22.0).abs() < 1e-4);
    assert!((view.road_half_width_at(768.0) - 165.0).abs() < 1e-4);
    assert!((view.road_half_width_at(1024.0) - 308.0).abs() < 1e-4);
}

#[test]
fn test_sky_and_ground_partition_the_canvas() {
    for horizon in [1.0, 100.4, 511.5, 563.0, 1022.6] {
        let view = PerspectiveParams::new(1024, 1024, horizon, 16.0, 280.0).unwrap();
        assert_eq!(view.sky_rows() + view.ground_rows(), 1024, "horizon {horizon}");
        assert!(view.sky_rows() > 0 && view.ground_rows() > 0, "horizon {horizon}");
    }
}

#[test]
fn test_horizon_on_the_canvas_edge_is_rejected() {
    for horizon in [0.0, 1024.0, -3.0, 2000.0, 0.2, 1023.7, f32::NAN] {
        let err = PerspectiveParams::new(1024, 1024, horizon, 16.0, 280.0).unwrap_err();
        assert!(matches!(err, SceneError::Geometry(_)), "horizon {horizon}: {err}");
    }
}

#[test]
fn test_negative_road_width_is_rejected() {
    let err = PerspectiveParams::new(1024, 1024, 512.0, -1.0, 280.0).unwrap_err();
    assert!(matches!(err, SceneError::Parameter { .. }));
}

#[test]
fn test_road_is_mirror_symmetric() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let road = view.road_trapezoid();
    let mirrored = mirror_x(&road, 1024.0);
    // Mirroring swaps left and right corners.
    assert_close(mirrored[0], road[1]);
    assert_close(mirrored[1], road[0]);
    assert_close(mirrored[2], road[3]);
    assert_close(mirrored[3], road[2]);
}

#[test]
fn test_treelines_are_mirror_images() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let left_pines = vec![
        PineSpec::new(20.0, 192.0, 30.0),
        PineSpec::new(110.0, 210.0, 30.0),
        PineSpec::new(385.0, 102.0, 19.0),
    ];
    let right_pines: Vec<PineSpec> = left_pines.iter().map(|p| p.mirrored(1024.0)).collect();

    let left = view.treeline(Side::Left, &left_pines, 8.0);
    let right = view.treeline(Side::Right, &right_pines, 8.0);
    assert_eq!(left.len(), right.len());
    assert_eq!(left.len(), left_pines.len() * 3 + 4);
    for (l, r) in mirror_x(&left, 1024.0).into_iter().zip(right) {
        assert_close(l, r);
    }
}

#[test]
fn test_treeline_peaks_rise_above_the_horizon() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let pines = [PineSpec::new(200.0, 150.0, 25.0)];
    let outline = view.treeline(Side::Left, &pines, 8.0);

    assert_close(outline[0], ScenePoint::new(0.0, 1024.0));
    assert_close(outline[1], ScenePoint::new(0.0, 563.0));
    assert_close(outline[2], ScenePoint::new(175.0, 571.0));
    assert_close(outline[3], ScenePoint::new(200.0, 413.0));
    assert_close(outline[4], ScenePoint::new(225.0, 571.0));
    assert_close(outline[5], ScenePoint::new(512.0 - 16.0, 563.0));
    assert_close(outline[6], ScenePoint::new(512.0 - 280.0, 1024.0));
    assert_eq!(outline.len(), 7);
}

#[test]
fn test_treeline_covers_the_ground_up_to_the_road_edge() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let pines = [PineSpec::new(200.0, 150.0, 25.0)];
    let tree = Color::rgb(20, 50, 20);

    for side in [Side::Left, Side::Right] {
        let mut canvas = Canvas::new(1024, 1024, Color::BLACK);
        let pines: Vec<PineSpec> = match side {
            Side::Left => pines.to_vec(),
            Side::Right => pines.iter().map(|p| p.mirrored(1024.0)).collect(),
        };
        canvas.fill_polygon(&view.treeline(side, &pines, 8.0), tree);

        let road_edge = view.road_half_width_at(950.0);
        let (outside, inside) = match side {
            Side::Left => (512.0 - road_edge - 10.0, 512.0 - road_edge + 10.0),
            Side::Right => (512.0 + road_edge + 10.0, 512.0 + road_edge - 10.0),
        };
        assert_eq!(canvas.get_pixel(outside as i32, 950), Some(tree), "{side:?}");
        assert_eq!(canvas.get_pixel(inside as i32, 950), Some(Color::BLACK), "{side:?}");
        // Far corner of the ground next to the canvas edge.
        let edge_x = if side == Side::Left { 5 } else { 1018 };
        assert_eq!(canvas.get_pixel(edge_x, 1020), Some(tree), "{side:?}");
    }
}

#[test]
fn test_dashes_stay_inside_their_slots() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let dashes = view.dashes(&dash_spec(10, 0.45));
    assert_eq!(dashes.len(), 10);

    for dash in &dashes {
        assert!(dash.y_start() >= dash.slot_start - 1e-3);
        assert!(dash.y_end() <= dash.slot_end + 1e-3);
        assert!(dash.y_end() > dash.y_start());
        assert!(dash.y_end() <= 1024.0);
    }
    for pair in dashes.windows(2) {
        assert!(
            pair[0].y_end() < pair[1].y_start(),
            "dashes overlap: {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_dashes_widen_towards_the_viewer() {
    let view = PerspectiveParams::new(1024, 1024, 563.0, 16.0, 280.0).unwrap();
    let dashes = view.dashes(&dash_spec(6, 0.4));
    let widths: Vec<f32> = dashes
        .iter()
        .map(|d| d.corners[2].x - d.corners[3].x)
        .collect();
    assert!(widths.windows(2).all(|w| w[1] > w[0]), "{widths:?}");
}

#[test]
fn test_preset_treelines_are_symmetric() {
    for scene in [
        SceneConfig::zen_dawn(),
        SceneConfig::ember_dusk(),
        SceneConfig::pastel_meadow(),
    ] {
        let width = scene.width as f32;
        let mirrored: Vec<PineSpec> = scene
            .treeline
            .left
            .iter()
            .map(|p| p.mirrored(width))
            .collect();
        assert_eq!(mirrored, scene.treeline.right, "{}", scene.name);
    }
}
