use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use isogo_assets::{AssetCache, CatalogDef, NameHashLoader, Palette};
use isogo_kernel::TileStore;
use isogo_stream::{GenerationPolicy, StreamConfig, WorldStreamer};

fn make_streamer(render_distance: i32) -> WorldStreamer {
    let catalog = CatalogDef::default().compile().expect("default catalog");
    let mut cache = AssetCache::new(NameHashLoader);
    let palette = Palette::resolve(&catalog, &mut cache).expect("palette");
    let config = StreamConfig {
        render_distance,
        ..StreamConfig::default()
    };
    WorldStreamer::new(config, GenerationPolicy::new(palette), Some(42))
}

fn bench_steady_scan(render_distance: i32, iterations: usize) {
    let mut streamer = make_streamer(render_distance);
    let mut store = TileStore::new();
    streamer.update(&mut store, Vec2::ZERO).expect("warm-up scan");

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(streamer.update(&mut store, black_box(Vec2::new(0.3, -0.2))));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  steady scan (R={render_distance}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_walking_scan(render_distance: i32, iterations: usize) {
    let mut streamer = make_streamer(render_distance);
    let mut store = TileStore::new();

    let start = Instant::now();
    for i in 0..iterations {
        // Walk one tile per scan so every scan materializes a fresh edge.
        let observer = Vec2::new(i as f32, -(i as f32));
        let _ = black_box(streamer.update(&mut store, black_box(observer)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  walking scan (R={render_distance}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, tiles={}",
        store.len()
    );
}

fn main() {
    println!("=== Window Scan Benchmarks ===\n");

    println!("Steady observer:");
    bench_steady_scan(6, 10000);
    bench_steady_scan(12, 2000);
    bench_steady_scan(24, 500);

    println!("\nWalking observer (generation on the leading edge):");
    bench_walking_scan(6, 2000);
    bench_walking_scan(12, 500);

    println!("\n=== Done ===");
}
