//! Property-based and parameterized tests for the axis engine

use imforest_core::domain::{resolve_domain_detailed, DomainResolution};
use imforest_core::nice::{is_nice_linear, snap_linear, snap_log};
use imforest_core::{
    classify, classify_interval, resolve_domain, AxisConfig, ClipDirection, ClipResult,
    ClipWindow, Domain, EffectSeries, EstimateRecord, ForestGeometry, LayoutOptions, PlotInput,
    RowDescriptor, RowLayout, ScaleMapper, ScaleType,
};
use proptest::prelude::*;
use rstest::rstest;

// === Parameterized cases ===

#[rstest]
#[case(0.68, 1.05)]
#[case(-3.72, 12.26)]
#[case(0.001, 0.0042)]
#[case(-250.0, 400.0)]
#[case(12.0, 13.5)]
fn test_snap_linear_is_nice_and_contains(#[case] min: f64, #[case] max: f64) {
    let (lo, hi) = snap_linear(min, max);
    assert!(lo <= min && hi >= max, "({lo}, {hi}) does not contain ({min}, {max})");
    assert!(is_nice_linear(lo), "{lo} is not nice");
    assert!(is_nice_linear(hi), "{hi} is not nice");
}

#[rstest]
#[case(0.52, 1.93, 0.5, 2.0)]
#[case(0.3, 2.2, 0.3, 2.5)]
#[case(0.0002, 0.0005, 0.0001, 0.001)]
#[case(50.0, 4200.0, 50.0, 10000.0)]
fn test_snap_log_cases(#[case] min: f64, #[case] max: f64, #[case] lo: f64, #[case] hi: f64) {
    assert_eq!(snap_log(min, max), (lo, hi));
}

#[rstest]
#[case(ScaleType::Linear, 1.0, 2.0, 0.0)]
#[case(ScaleType::Linear, -1.0, 1.0, 0.0)]
#[case(ScaleType::Log, 0.5, 0.8, 1.0)]
#[case(ScaleType::Log, 1.5, 3.0, 1.0)]
fn test_include_null_always_covers_null(
    #[case] scale: ScaleType,
    #[case] a: f64,
    #[case] b: f64,
    #[case] null_value: f64,
) {
    let config = AxisConfig::builder().with_scale(scale).build().unwrap();
    let domain = resolve_domain(&[a, b], &[], null_value, &config);
    assert!(domain.contains(null_value));
}

#[rstest]
#[case(&[RowDescriptor::data(), RowDescriptor::spacer(), RowDescriptor::data()], &[0.0, 24.0, 36.0])]
#[case(&[RowDescriptor::header(), RowDescriptor::data(), RowDescriptor::summary()], &[0.0, 24.0, 48.0])]
#[case(&[RowDescriptor::spacer(), RowDescriptor::spacer(), RowDescriptor::data()], &[0.0, 12.0, 24.0])]
fn test_row_positions(#[case] rows: &[RowDescriptor], #[case] expected: &[f64]) {
    let layout = RowLayout::layout(rows, 24.0).unwrap();
    assert_eq!(layout.y_positions(), expected);
}

#[test]
fn test_clip_example_log_factor_two() {
    let config = AxisConfig::builder()
        .with_log_scale()
        .with_clip_factor(2.0)
        .build()
        .unwrap();
    let resolution = resolve_domain_detailed(&[0.5, 0.8], &[0.3, 1.8, 2.5], 1.0, &config);
    assert_eq!(resolution.estimate_range, Domain::new(0.5, 1.0).unwrap());

    let window = resolution.clip_window();
    assert_eq!(
        classify(2.5, &window),
        ClipResult::ClippedTo {
            boundary: 2.0,
            direction: ClipDirection::TowardUpper
        }
    );
    assert_eq!(classify(1.8, &window), ClipResult::Visible { value: 1.8 });
}

/// Excluded bounds are cut toward their side, kept bounds stay visible, and
/// the resolver's clipped flags match what the classifier reports
fn assert_classifier_agrees(
    resolution: &DomainResolution,
    bounds: &[f64],
) -> Result<(), TestCaseError> {
    let window = resolution.clip_window();
    let mut saw_lower = false;
    let mut saw_upper = false;
    for &b in bounds {
        let result = classify(b, &window);
        if resolution.clip_bounds.excludes_below(b) {
            prop_assert_eq!(result.direction(), Some(ClipDirection::TowardLower), "bound {}", b);
            saw_lower = true;
        } else if resolution.clip_bounds.excludes_above(b) {
            prop_assert_eq!(result.direction(), Some(ClipDirection::TowardUpper), "bound {}", b);
            saw_upper = true;
        } else {
            prop_assert_eq!(result, ClipResult::Visible { value: b });
        }
        prop_assert!(
            resolution.domain.contains(result.value()),
            "{:?} outside {:?}",
            result,
            resolution.domain
        );
    }
    prop_assert_eq!(saw_lower, resolution.lower_clipped);
    prop_assert_eq!(saw_upper, resolution.upper_clipped);
    Ok(())
}

// === Properties ===

fn record_strategy() -> impl Strategy<Value = EstimateRecord> {
    (-50.0f64..50.0, 0.0f64..20.0, 0.0f64..20.0)
        .prop_map(|(point, below, above)| EstimateRecord::from_values(point, point - below, point + above))
}

fn log_record_strategy() -> impl Strategy<Value = EstimateRecord> {
    (0.01f64..100.0, 1.0f64..10.0, 1.0f64..10.0)
        .prop_map(|(point, down, up)| EstimateRecord::from_values(point, point / down, point * up))
}

fn plot_input(records: Vec<EstimateRecord>, null_value: f64) -> PlotInput {
    let rows = vec![RowDescriptor::data(); records.len()];
    PlotInput::new(rows, vec![EffectSeries::new("primary", records)], null_value)
}

proptest! {
    #[test]
    fn test_pipeline_is_deterministic(records in prop::collection::vec(record_strategy(), 0..20)) {
        let input = plot_input(records, 0.0);
        let config = AxisConfig::linear();
        let options = LayoutOptions::default();
        let first = ForestGeometry::compute(&input, &config, &options, 500.0).unwrap();
        let second = ForestGeometry::compute(&input, &config, &options, 500.0).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_domain_contains_points_and_kept_bounds(
        records in prop::collection::vec(record_strategy(), 1..20),
        clip in 0.0f64..5.0,
    ) {
        let input = plot_input(records, 0.0);
        let config = AxisConfig::builder().with_clip_factor(clip).build().unwrap();
        let points = input.points();
        let bounds = input.bounds();
        let resolution = resolve_domain_detailed(&points, &bounds, 0.0, &config);

        for p in &points {
            prop_assert!(resolution.domain.contains(*p), "point {} outside {:?}", p, resolution.domain);
        }
        for b in &bounds {
            let excluded = resolution.clip_bounds.excludes_below(*b)
                || resolution.clip_bounds.excludes_above(*b);
            if !excluded {
                prop_assert!(resolution.domain.contains(*b), "kept bound {} outside {:?}", b, resolution.domain);
            }
        }
    }

    #[test]
    fn test_classifier_agrees_with_resolver_linear(
        records in prop::collection::vec(record_strategy(), 1..20),
        clip in 0.0f64..5.0,
    ) {
        let input = plot_input(records, 0.0);
        let config = AxisConfig::builder().with_clip_factor(clip).build().unwrap();
        let bounds = input.bounds();
        let resolution = resolve_domain_detailed(&input.points(), &bounds, 0.0, &config);
        assert_classifier_agrees(&resolution, &bounds)?;
    }

    #[test]
    fn test_classifier_agrees_with_resolver_log(
        records in prop::collection::vec(log_record_strategy(), 1..20),
        clip in 0.0f64..5.0,
    ) {
        let input = plot_input(records, 1.0);
        let config = AxisConfig::builder()
            .with_log_scale()
            .with_clip_factor(clip)
            .build()
            .unwrap();
        let bounds = input.bounds();
        let resolution = resolve_domain_detailed(&input.points(), &bounds, 1.0, &config);
        assert_classifier_agrees(&resolution, &bounds)?;
    }

    #[test]
    fn test_interval_clip_matches_endpoints(
        records in prop::collection::vec(log_record_strategy(), 1..20),
    ) {
        let config = AxisConfig::builder()
            .with_log_scale()
            .with_clip_factor(1.5)
            .build()
            .unwrap();
        let input = plot_input(records, 1.0);
        let resolution = resolve_domain_detailed(&input.points(), &input.bounds(), 1.0, &config);
        let window = resolution.clip_window();
        for record in &input.effects[0].records {
            let clip = classify_interval(record, &window);
            prop_assert_eq!(clip.lower, record.lower().map(|v| classify(v, &window)));
            prop_assert_eq!(clip.upper, record.upper().map(|v| classify(v, &window)));
            if clip.fully_outside {
                let directions: Vec<_> = [clip.lower, clip.upper]
                    .into_iter()
                    .flatten()
                    .map(|c| c.direction())
                    .collect();
                prop_assert!(directions[0].is_some());
                prop_assert!(directions.iter().all(|d| *d == directions[0]));
            }
        }
    }

    #[test]
    fn test_log_domain_positive_and_contains_points(
        records in prop::collection::vec(log_record_strategy(), 1..20),
    ) {
        let input = plot_input(records, 1.0);
        let points = input.points();
        let domain = resolve_domain(&points, &input.bounds(), 1.0, &AxisConfig::log());
        prop_assert!(domain.min() > 0.0);
        prop_assert!(domain.min() < domain.max());
        for p in &points {
            prop_assert!(domain.contains(*p));
        }
    }

    #[test]
    fn test_never_clip_keeps_every_bound_visible(
        records in prop::collection::vec(record_strategy(), 1..20),
    ) {
        let input = plot_input(records, 0.0);
        let config = AxisConfig::builder().without_clipping().build().unwrap();
        let resolution = resolve_domain_detailed(&input.points(), &input.bounds(), 0.0, &config);
        let window = resolution.clip_window();
        prop_assert_eq!(window, ClipWindow::from(resolution.domain));
        for b in input.bounds() {
            prop_assert!(!classify(b, &window).is_clipped(), "bound {} clipped by {:?}", b, window);
        }
    }

    #[test]
    fn test_snap_linear_never_shrinks(min in -1.0e4f64..1.0e4, span in 1.0e-3f64..1.0e4) {
        let max = min + span;
        let (lo, hi) = snap_linear(min, max);
        prop_assert!(lo <= min && hi >= max);
    }

    #[test]
    fn test_snap_log_never_shrinks(min in 1.0e-5f64..1.0e4, factor in 1.001f64..100.0) {
        let max = min * factor;
        let (lo, hi) = snap_log(min, max);
        prop_assert!(lo > 0.0);
        prop_assert!(lo <= min && hi >= max);
    }

    #[test]
    fn test_mapper_round_trip(min in -100.0f64..100.0, span in 0.1f64..100.0, t in 0.0f64..1.0) {
        let domain = Domain::new(min, min + span).unwrap();
        let mapper = ScaleMapper::new(domain, ScaleType::Linear, 400.0).with_marker_margin(8.0);
        let value = min + t * span;
        let position = mapper.map(value);
        prop_assert!(position >= mapper.start() - 1e-9 && position <= mapper.end() + 1e-9);
        prop_assert!((mapper.invert(position) - value).abs() < 1e-6 * span.max(1.0));
    }

    #[test]
    fn test_row_layout_is_contiguous(kinds in prop::collection::vec(0u8..4, 0..30)) {
        let rows: Vec<RowDescriptor> = kinds
            .iter()
            .map(|k| match k {
                0 => RowDescriptor::data(),
                1 => RowDescriptor::header(),
                2 => RowDescriptor::summary(),
                _ => RowDescriptor::spacer(),
            })
            .collect();
        let layout = RowLayout::layout(&rows, 24.0).unwrap();
        let mut y = 0.0;
        for slot in &layout.rows {
            prop_assert_eq!(slot.y_position, y);
            y += slot.height;
        }
        prop_assert_eq!(layout.total_height, y);
    }
}
