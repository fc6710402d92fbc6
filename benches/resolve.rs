//! Benchmarks for icon resolution and table building
//!
//! Run with: cargo bench --bench resolve

use std::path::PathBuf;

use tree_icons::{
    emit, resolve, ClipboardState, EmitMode, EntryDescriptor, HighlightTable, IconConfig,
    RenderContext, StdFs,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn builtin_table() -> HighlightTable {
    let config = IconConfig::builtin().expect("built-in icons parse");
    HighlightTable::build(&config, "TreeIcons").expect("built-in icons build")
}

// ============================================================================
// Table benchmarks
// ============================================================================

#[divan::bench]
fn build_builtin_table(bencher: divan::Bencher) {
    let config = IconConfig::builtin().expect("built-in icons parse");
    bencher.bench_local(|| HighlightTable::build(divan::black_box(&config), "TreeIcons"));
}

#[divan::bench]
fn emit_builtin_full(bencher: divan::Bencher) {
    let table = builtin_table();
    bencher.bench_local(|| emit(divan::black_box(&table), EmitMode::Full));
}

#[divan::bench]
fn emit_builtin_link_only(bencher: divan::Bencher) {
    let table = builtin_table();
    bencher.bench_local(|| emit(divan::black_box(&table), EmitMode::LinkOnly));
}

// ============================================================================
// Resolution benchmarks
// ============================================================================

#[divan::bench(args = ["main.rs", "app.min.js", "README.md", "unknown.xyz"])]
fn resolve_file(bencher: divan::Bencher, name: &str) {
    let table = builtin_table();
    let path = PathBuf::from("/project").join(name);
    let context = RenderContext::new(["icons", "filename"]);
    let clipboard = ClipboardState::default();

    bencher.bench_local(|| {
        resolve(
            &EntryDescriptor::file(divan::black_box(&path)),
            &context,
            &clipboard,
            &table,
            &StdFs,
        )
        .text()
        .len()
    });
}

#[divan::bench(args = [10, 100, 1000])]
fn resolve_listing(bencher: divan::Bencher, count: usize) {
    let table = builtin_table();
    let extensions = ["rs", "js", "md", "toml", "py", "txt", "lock", "bin"];
    let paths: Vec<PathBuf> = (0..count)
        .map(|i| {
            let ext = extensions[i % extensions.len()];
            PathBuf::from(format!("/project/file{}.{}", i, ext))
        })
        .collect();
    let context = RenderContext::new(["icons", "filename"]);
    let clipboard = ClipboardState::default();

    bencher.bench_local(|| {
        for path in &paths {
            divan::black_box(
                resolve(
                    &EntryDescriptor::file(path),
                    &context,
                    &clipboard,
                    &table,
                    &StdFs,
                )
                .text(),
            );
        }
    });
}
