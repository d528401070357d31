use waterfall_room::query::brute_force_intersecting;
use waterfall_room::{
    EdgeInsets, ElementKind, InsetReference, LayoutAttributes, Rect, RenderDirection, Size,
    StaticMetrics, SupplementaryKind, Viewport, WaterfallConfig, WaterfallLayout,
};

const WIDTH: f64 = 330.0;

/// Small deterministic generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn range(&mut self, lo: u64, hi: u64) -> f64 {
        (lo + self.next() % (hi - lo)) as f64
    }
}

fn random_metrics(seed: u64, sections: usize) -> StaticMetrics {
    let mut rng = Lcg(seed);
    let mut metrics = StaticMetrics::new();
    for section in 0..sections {
        let count = rng.range(0, 60) as usize;
        let items = (0..count)
            .map(|_| Size::new(rng.range(50, 400), rng.range(20, 600)))
            .collect();
        metrics.push_section(items);
        let overrides = metrics.section_overrides_mut(section);
        overrides.column_count = Some(rng.range(1, 5) as usize);
        overrides.header_height = Some(rng.range(0, 3) * 20.0);
        overrides.footer_height = Some(rng.range(0, 2) * 15.0);
        overrides.insets = Some(EdgeInsets::new(rng.range(0, 12), 5.0, rng.range(0, 12), 5.0));
    }
    metrics
}

fn engine(metrics: StaticMetrics, direction: RenderDirection) -> WaterfallLayout<StaticMetrics> {
    let config = WaterfallConfig {
        render_direction: direction,
        ..WaterfallConfig::default()
    };
    let mut layout = WaterfallLayout::with_config(metrics, config).unwrap();
    layout.attach(Viewport::new(Rect::new(0.0, 0.0, WIDTH, 600.0)));
    layout
}

fn column_of(attrs: &LayoutAttributes, left: f64, width: f64, spacing: f64) -> usize {
    ((attrs.frame.x - left) / (width + spacing)).round() as usize
}

const DIRECTIONS: [RenderDirection; 3] = [
    RenderDirection::ShortestFirst,
    RenderDirection::LeftToRight,
    RenderDirection::RightToLeft,
];

#[test]
fn column_tables_are_flat_and_sized_per_section() {
    for direction in DIRECTIONS {
        let mut layout = engine(random_metrics(7, 6), direction);
        let snapshot = layout.layout().unwrap();
        for (table, section) in snapshot
            .output
            .column_heights
            .iter()
            .zip(&snapshot.output.sections)
        {
            assert_eq!(table.len(), section.metrics.column_count);
            assert!(table.heights().iter().all(|h| *h == table.heights()[0]));
        }
    }
}

#[test]
fn shortest_first_always_picks_a_minimum_column() {
    let mut layout = engine(random_metrics(11, 5), RenderDirection::ShortestFirst);
    let snapshot = layout.layout().unwrap();

    for section in &snapshot.output.sections {
        let m = section.metrics;
        let Some(first) = section.items.first() else {
            continue;
        };
        let mut heights = vec![first.frame.y; m.column_count];
        for item in &section.items {
            let column = column_of(item, m.insets.left, m.item_width, 10.0);
            assert_eq!(heights[column], item.frame.y);
            assert!(heights.iter().all(|h| item.frame.y <= *h));
            heights[column] = item.frame.max_y() + m.interitem_spacing;
        }
    }
}

#[test]
fn round_robin_placement_ignores_prior_heights() {
    for direction in [RenderDirection::LeftToRight, RenderDirection::RightToLeft] {
        let mut layout = engine(random_metrics(23, 4), direction);
        let snapshot = layout.layout().unwrap();
        for section in &snapshot.output.sections {
            let m = section.metrics;
            for item in &section.items {
                let expected = match direction {
                    RenderDirection::LeftToRight => item.item % m.column_count,
                    _ => m.column_count - 1 - item.item % m.column_count,
                };
                assert_eq!(column_of(item, m.insets.left, m.item_width, 10.0), expected);
            }
        }
    }
}

#[test]
fn content_height_grows_with_items_and_is_stable() {
    let metrics = StaticMetrics::new().with_section(Vec::new());
    let mut layout = engine(metrics, RenderDirection::ShortestFirst);
    let mut rng = Lcg(99);
    let mut previous = layout.content_size().height;

    for _ in 0..40 {
        let size = Size::new(rng.range(50, 300), rng.range(10, 300));
        layout.provider_mut().push_item(0, size);
        let height = layout.content_size().height;
        assert!(height >= previous);

        layout.invalidate();
        assert_eq!(layout.content_size().height, height);
        previous = height;
    }
}

#[test]
fn union_rects_partition_the_attribute_list() {
    let mut layout = engine(random_metrics(5, 8), RenderDirection::ShortestFirst);
    let snapshot = layout.layout().unwrap();
    let total = snapshot.output.attributes.len();
    let size = snapshot.index.union_size();

    assert_eq!(snapshot.index.len(), total.div_ceil(size));
    let mut next = 0;
    for run in 0..snapshot.index.len() {
        let range = snapshot.index.run_range(run);
        assert_eq!(range.start, next);
        next = range.end;
    }
    assert_eq!(next, total);
}

#[test]
fn indexed_query_matches_brute_force_for_every_direction() {
    for direction in DIRECTIONS {
        for union_size in [1, 3, 20] {
            let mut layout = engine(random_metrics(31, 6), direction);
            layout.set_union_size(union_size).unwrap();
            let height = layout.content_size().height;
            let all = layout.layout().unwrap().output.attributes.clone();

            let mut rng = Lcg(union_size as u64);
            for _ in 0..60 {
                let query = Rect::new(
                    rng.range(0, WIDTH as u64),
                    rng.range(0, height.max(1.0) as u64 + 1),
                    rng.range(1, 200),
                    rng.range(1, 700),
                );
                assert_eq!(
                    layout.attributes_intersecting(&query),
                    brute_force_intersecting(&all, &query),
                    "{direction:?} union_size={union_size} query={query:?}"
                );
            }
        }
    }
}

#[test]
fn endpoint_only_boxes_would_miss_items() {
    // Columns are 160 wide. Items 0, 2 and 3 stack in column 0; item 1 is a
    // tall item in column 1, so the first+last box never reaches column 1.
    let metrics = StaticMetrics::new().with_section(vec![
        Size::new(160.0, 20.0),
        Size::new(160.0, 300.0),
        Size::new(160.0, 20.0),
        Size::new(160.0, 20.0),
    ]);
    let mut layout = engine(metrics, RenderDirection::ShortestFirst);
    layout.set_union_size(4).unwrap();
    let attrs = layout.layout().unwrap().output.attributes.clone();

    let endpoints = attrs[0].frame.union(&attrs[3].frame);
    let gap = Rect::new(200.0, 5.0, 10.0, 10.0);
    assert!(!endpoints.intersects(&gap));
    assert!(attrs[1].frame.intersects(&gap));

    assert_eq!(layout.attributes_intersecting(&gap), vec![attrs[1]]);
}

#[test]
fn header_footer_scenario() {
    let metrics = StaticMetrics::new()
        .with_section(vec![Size::new(0.0, 100.0)])
        .with_header_height(0, 50.0)
        .with_footer_height(0, 30.0);
    let mut layout = engine(metrics, RenderDirection::ShortestFirst);

    assert_eq!(layout.attributes_for_item(0, 0).unwrap().frame.y, 50.0);
    let footer = layout
        .attributes_for_supplementary(SupplementaryKind::Footer, 0)
        .unwrap();
    assert_eq!(footer.kind, ElementKind::Footer);
    assert_eq!(footer.frame.y, 150.0);
    assert_eq!(layout.content_size().height, 180.0);
}

#[test]
fn pinned_header_clamps_to_section_maximum() {
    let metrics = StaticMetrics::new()
        .with_section(vec![Size::new(0.0, 100.0); 4])
        .with_section(vec![Size::new(0.0, 100.0); 4])
        .with_header_height(0, 40.0)
        .with_insets(0, EdgeInsets::new(8.0, 0.0, 12.0, 0.0));
    let mut layout = engine(metrics, RenderDirection::ShortestFirst);
    layout.set_pin_headers(true);

    let section = layout.layout().unwrap().output.sections[0].clone();
    let last = section.items.last().unwrap().frame;
    let maximum = last.max_y() + 12.0 - 40.0;

    for offset in [maximum + 1.0, maximum + 250.0, 10_000.0] {
        layout.set_bounds(Rect::new(0.0, offset, WIDTH, 600.0));
        let header = layout
            .attributes_for_supplementary(SupplementaryKind::Header, 0)
            .unwrap();
        assert_eq!(header.frame.y, maximum);
    }

    layout.set_bounds(Rect::new(0.0, 0.0, WIDTH, 600.0));
    let header = layout
        .attributes_for_supplementary(SupplementaryKind::Header, 0)
        .unwrap();
    assert_eq!(header.frame.y, 0.0);
}

#[test]
fn pinning_always_requests_invalidation_on_bounds_change() {
    let mut layout = engine(random_metrics(3, 2), RenderDirection::ShortestFirst);
    let scrolled = Rect::new(0.0, 80.0, WIDTH, 600.0);
    assert!(!layout.should_invalidate(&scrolled));

    layout.set_pin_headers(true);
    assert!(layout.should_invalidate(&scrolled));
    assert!(layout.should_invalidate(&Rect::new(0.0, 0.0, WIDTH, 600.0)));
}

#[test]
fn inset_reference_drives_item_and_content_width() {
    let viewport = Viewport::new(Rect::new(0.0, 0.0, WIDTH, 600.0))
        .with_content_inset(EdgeInsets::new(0.0, 10.0, 0.0, 10.0))
        .with_safe_area(EdgeInsets::new(44.0, 20.0, 34.0, 20.0))
        .with_layout_margins(EdgeInsets::new(8.0, 35.0, 8.0, 35.0));
    let metrics = StaticMetrics::new().with_section(vec![Size::new(100.0, 100.0); 4]);
    let mut layout = WaterfallLayout::new(metrics);
    layout.attach(viewport);

    // 2 columns, 10 spacing: (width - 10) / 2 after the referenced insets.
    let cases = [
        (InsetReference::ContentInset, 310.0, 150.0),
        (InsetReference::SafeArea, 290.0, 140.0),
        (InsetReference::LayoutMargins, 260.0, 125.0),
    ];
    for (reference, content_width, item_width) in cases {
        layout.set_inset_reference(reference);
        assert!(!layout.is_prepared());
        assert_eq!(layout.item_width(0), item_width);
        assert_eq!(layout.content_size().width, content_width);

        let first = layout.attributes_for_item(0, 0).unwrap();
        assert_eq!(first.frame.width, item_width);
        assert_eq!(first.frame.height, item_width);
    }
}
