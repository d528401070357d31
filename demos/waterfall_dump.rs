//! Lay out a small feed and print every attribute as JSON lines.
//!
//! ```bash
//! cargo run --example waterfall_dump
//! cargo run --example waterfall_dump -- layout.json
//! ```
//!
//! The optional argument is a `WaterfallConfig` JSON file.

use std::env;
use std::sync::Arc;

use serde_json::json;
use waterfall_room::logging::{FileSink, LogLevel};
use waterfall_room::{
    EdgeInsets, EngineOptions, Logger, NullLayoutAudit, Rect, Size, StaticMetrics, Viewport,
    WaterfallConfig, WaterfallLayout,
};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = match env::args().nth(1) {
        Some(path) => WaterfallConfig::from_path(path)?,
        None => WaterfallConfig {
            column_count: 3,
            pin_headers: true,
            ..WaterfallConfig::default()
        },
    };

    let metrics = StaticMetrics::new()
        .with_section(feed(12, 3))
        .with_section(feed(7, 5))
        .with_header_height(0, 48.0)
        .with_header_height(1, 48.0)
        .with_footer_height(1, 32.0)
        .with_insets(1, EdgeInsets::new(12.0, 8.0, 12.0, 8.0));

    let mut options = EngineOptions {
        logger: Some(
            Logger::new(FileSink::new("waterfall_dump.log", 1 << 20)?)
                .with_min_level(LogLevel::Debug),
        ),
        audit: Some(Arc::new(NullLayoutAudit)),
        ..EngineOptions::default()
    };
    options.enable_metrics();

    let mut layout = WaterfallLayout::with_config(metrics, config)?.with_options(options);
    layout.attach(Viewport::new(Rect::new(0.0, 0.0, 390.0, 844.0)));

    let size = layout.content_size();
    println!("{}", json!({ "content_width": size.width, "content_height": size.height }));

    let everything = Rect::new(0.0, 0.0, size.width, size.height);
    for attrs in layout.attributes_intersecting(&everything) {
        println!("{}", serde_json::to_string(&attrs)?);
    }

    layout.emit_metrics();
    Ok(())
}

fn feed(count: usize, seed: usize) -> Vec<Size> {
    (0..count)
        .map(|i| Size::new(300.0, 200.0 + ((i * 53 + seed * 17) % 260) as f64))
        .collect()
}
