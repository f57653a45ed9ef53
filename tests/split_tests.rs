use gpui::{px, Bounds, Pixels, Point, Size};
use gpui_split_chart::data_types::{DataSet, Entry, LineMode};
use gpui_split_chart::path::PathOp;
use gpui_split_chart::split::{IndexRange, SegmentPathBuilder, SplitPlan, XBounds};
use gpui_split_chart::transform::PlotTransform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn plot_bounds() -> Bounds<Pixels> {
    Bounds::new(Point::new(px(10.0), px(20.0)), Size::new(px(300.0), px(200.0)))
}

fn sample() -> DataSet {
    DataSet::new(
        [(0.0, 0.0), (1.0, 5.0), (2.0, 3.0), (3.0, 8.0)]
            .into_iter()
            .map(Entry::from),
        "sample",
    )
}

fn random_data_set(rng: &mut StdRng) -> DataSet {
    let count = rng.random_range(2..60);
    let mut x = 0.0;
    let entries: Vec<Entry> = (0..count)
        .map(|_| {
            x += rng.random_range(0.1..5.0);
            Entry::new(x, rng.random_range(-50.0..50.0))
        })
        .collect();
    DataSet::new(entries, "random")
}

fn transform_for(data_set: &DataSet) -> PlotTransform {
    let (x0, x1, y0, y1) = data_set.bounds().unwrap();
    PlotTransform::for_domains((x0, x1), (y0.min(0.0), y1.max(0.0)), plot_bounds())
}

#[test]
fn test_highlight_splits_sample_at_shared_vertex() {
    let ds = sample();
    let transform = transform_for(&ds);
    let bounds = XBounds::full(&ds).unwrap();
    let plan = SplitPlan::new(&bounds, Some(1));
    let segments = plan.segments();
    assert_eq!(segments[0].stroke, IndexRange::new(0, 1));
    assert_eq!(segments[1].stroke, IndexRange::new(2, 3));

    let builder = SegmentPathBuilder::new(&ds, &transform, 1.0);
    let leading = builder.stroke_path(segments[0].stroke).unwrap();
    let trailing = builder.stroke_path(segments[1].stroke).unwrap();

    let h = transform.value_to_pixel(1.0, 5.0, 1.0);
    assert_eq!(leading.points().len(), 2);
    assert_eq!(leading.last_point(), Some(h));
    assert_eq!(trailing.first_point(), Some(h));
}

#[test]
fn test_unsplit_fill_has_two_extra_vertices() {
    let ds = sample();
    let transform = transform_for(&ds);
    let bounds = XBounds::full(&ds).unwrap();
    let SplitPlan::Whole(ranges) = SplitPlan::new(&bounds, None) else {
        panic!("expected an unsplit plan");
    };
    let fill = SegmentPathBuilder::new(&ds, &transform, 1.0)
        .fill_path(ranges.fill, 0.0)
        .unwrap();

    assert_eq!(fill.vertex_count(), ds.entry_count() + 2);
    assert!(fill.is_closed());
    let baseline = transform.value_to_pixel(0.0, 0.0, 1.0).y;
    assert_eq!(fill.first_point().unwrap().y, baseline);
    assert_eq!(fill.last_point().unwrap().y, baseline);
}

#[test]
fn test_split_never_leaves_a_seam() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let ds = random_data_set(&mut rng);
        let transform = transform_for(&ds);
        let bounds = XBounds::full(&ds).unwrap();
        let h = rng.random_range(0..ds.entry_count());
        let builder = SegmentPathBuilder::new(&ds, &transform, 1.0);

        let segments = SplitPlan::new(&bounds, Some(h)).segments();
        let leading = builder.stroke_path(segments[0].stroke).unwrap();
        let whole = builder
            .stroke_path(IndexRange::new(bounds.min, bounds.last()))
            .unwrap();

        match builder.stroke_path(segments[1].stroke) {
            Some(trailing) => {
                // Leading and trailing share exactly the highlighted vertex and
                // together retrace the unsplit line.
                assert_eq!(leading.last_point(), trailing.first_point());
                let mut joined = leading.points();
                joined.extend(trailing.points().into_iter().skip(1));
                assert_eq!(joined, whole.points());
            }
            None => {
                assert_eq!(h, bounds.last());
                assert_eq!(leading.points(), whole.points());
            }
        }
    }
}

#[test]
fn test_fill_regions_abut_and_close_on_baseline() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let ds = random_data_set(&mut rng);
        let transform = transform_for(&ds);
        let bounds = XBounds::full(&ds).unwrap();
        let h = rng.random_range(0..ds.entry_count());
        let builder = SegmentPathBuilder::new(&ds, &transform, 1.0);
        let baseline = transform.value_to_pixel(0.0, 0.0, 1.0).y;

        let segments = SplitPlan::new(&bounds, Some(h)).segments();
        let leading = builder.fill_path(segments[0].fill, 0.0).unwrap();
        let trailing = builder.fill_path(segments[1].fill, 0.0).unwrap();

        for fill in [&leading, &trailing] {
            assert!(fill.is_closed());
            assert_eq!(fill.first_point().unwrap().y, baseline);
            assert_eq!(fill.last_point().unwrap().y, baseline);
        }
        assert_eq!(
            leading.last_point().unwrap().x,
            trailing.first_point().unwrap().x
        );
    }
}

#[test]
fn test_stepped_stroke_adds_one_elbow_per_pair() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let mut ds = random_data_set(&mut rng);
        ds.mode = LineMode::Stepped;
        let transform = transform_for(&ds);
        let n = ds.entry_count();
        let path = SegmentPathBuilder::new(&ds, &transform, 1.0)
            .stroke_path(IndexRange::new(0, n - 1))
            .unwrap();

        assert_eq!(path.vertex_count(), n + (n - 1));
        // Every segment is axis-aligned.
        let points = path.points();
        for pair in points.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
    }
}

#[test]
fn test_stroke_starts_with_single_move() {
    let ds = sample();
    let transform = transform_for(&ds);
    let path = SegmentPathBuilder::new(&ds, &transform, 1.0)
        .stroke_path(IndexRange::new(0, 3))
        .unwrap();
    let moves = path
        .ops()
        .iter()
        .filter(|op| matches!(op, PathOp::MoveTo(_)))
        .count();
    assert_eq!(moves, 1);
    assert!(!path.is_closed());
}

#[test]
fn test_visible_window_limits_walk() {
    let ds = DataSet::new((0..100).map(|i| Entry::new(i as f64, i as f64)), "ramp");
    let bounds = XBounds::new(&ds, (20.5, 40.5), 1.0).unwrap();
    assert_eq!((bounds.min, bounds.last()), (20, 41));

    let plan = SplitPlan::new(&bounds, Some(90));
    let SplitPlan::Split {
        highlight_index,
        trailing,
        ..
    } = plan
    else {
        panic!("expected a split plan");
    };
    assert_eq!(highlight_index, 41);
    assert!(trailing.stroke.is_empty());
}
