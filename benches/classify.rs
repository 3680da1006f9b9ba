use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

use mailpane::view::ViewContext;

fn bench_icon_class(c: &mut Criterion) {
    let mimes = [
        "image/png",
        "application/octet-stream",
        "application/vnd.ms-powerpoint.slideshow.macroEnabled.12",
        "application/x-rar-compressed",
    ];
    c.bench_function("icon_class", |b| {
        b.iter(|| {
            mimes
                .iter()
                .map(|m| mailpane::view::icon::icon_class(m))
                .count()
        })
    });
}

fn bench_load_fixture(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("attachments.json");
    let ctx = ViewContext::default();

    c.bench_function("load_attachments_fixture", |b| {
        b.iter(|| {
            let loaded = mailpane::input::load_attachments(&fixture_path, &ctx).unwrap();
            loaded
                .views
                .iter()
                .filter(|v| v.has_preview())
                .map(|v| v.link_preview_main())
                .count()
        })
    });
}

criterion_group!(benches, bench_icon_class, bench_load_fixture);
criterion_main!(benches);
