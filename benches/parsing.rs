//! Criterion benchmarks for URI parsing, path algebra and the codec.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use uri_kit::{Encoding, Path, Uri, UriBuilder, decode, encode};

/// Benchmark: `Uri::parse` with varying URI shapes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("minimal", "http://a.co/x"),
        ("typical", "http://www.foo.bar/docs/guide/index.html"),
        ("deep_path", "http://example.com/level1/level2/level3/level4/level5/file.txt"),
        ("with_query", "http://example.com/search?q=rust&page=2&lang=en"),
        ("multi_scheme", "toto:x:y://a:b@www.google.com:80/z/a/b/c?x=y&a=b#fragment"),
        (
            "escaped",
            "http://ru.wikipedia.org/wiki/%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F?q=a+b%26c",
        ),
        ("backslashes", "C:\\Program Files\\app\\bin\\tool.exe"),
    ];

    for (name, uri) in test_cases {
        group.throughput(Throughput::Bytes(uri.len() as u64));
        group.bench_with_input(BenchmarkId::new("uri", name), &uri, |b, uri| {
            b.iter(|| Uri::parse(black_box(uri)));
        });
    }

    group.finish();
}

/// Benchmark: URI serialization
fn bench_to_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_string");

    let test_cases = [
        ("plain", "http://www.foo.bar/a/b/c"),
        ("with_query", "http://www.foo.bar/a/b/c?x=y&a=b#top"),
        ("non_ascii", "http://ru.wikipedia.org/wiki/%D0%A0%D0%BE%D1%81%D1%81%D0%B8%D1%8F"),
    ];

    for (name, uri_str) in test_cases {
        let uri = Uri::parse(uri_str);
        group.bench_with_input(BenchmarkId::new("full", name), &uri, |b, uri| {
            b.iter(|| black_box(uri).to_string());
        });
        group.bench_with_input(BenchmarkId::new("escape", name), &uri, |b, uri| {
            b.iter(|| black_box(uri).to_string_with(Encoding::ESCAPE));
        });
    }

    group.finish();
}

/// Benchmark: resolve and relativize at varying depths
fn bench_path_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_algebra");

    for depth in [1, 2, 4, 8, 16] {
        let segments: Vec<&str> = (0..depth)
            .map(|i| match i % 4 {
                0 => "alpha",
                1 => "beta",
                2 => "gamma",
                _ => "delta",
            })
            .collect();

        let base = Path::from_segments(true, segments.iter().copied(), true);
        let target = Path::from_segments(
            true,
            segments[..(depth / 2).max(1)].iter().copied().chain(["other", "file.txt"]),
            false,
        );
        let relative = base.relativize(&target);

        group.bench_with_input(
            BenchmarkId::new("relativize/depth", depth),
            &(base.clone(), target),
            |b, (base, target)| {
                b.iter(|| black_box(base).relativize(black_box(target)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("resolve/depth", depth),
            &(base, relative),
            |b, (base, relative)| {
                b.iter(|| black_box(base).resolve(black_box(relative)));
            },
        );
    }

    group.bench_function("normalize", |b| {
        let path = Path::parse("a/b/./c/../../d/e/../f/");
        b.iter(|| black_box(&path).normalize());
    });

    group.finish();
}

/// Benchmark: builder edits
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    group.bench_function("from_parts", |b| {
        b.iter(|| {
            UriBuilder::new()
                .scheme(black_box("http"))
                .host(black_box("www.foo.bar"))
                .port(8080)
                .path_str(black_box("/a/b/c"))
                .param("x", "y")
                .fragment("top")
                .build()
        });
    });

    let uri = Uri::parse("http://www.foo.bar/a/b/c/file.txt?x=y");
    group.bench_function("edit_file_name", |b| {
        b.iter(|| {
            black_box(&uri)
                .to_builder()
                .map_path(|path| path.file_name("index.html"))
                .build()
        });
    });

    group.finish();
}

/// Benchmark: percent encoding and decoding
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let test_cases = [
        ("ascii", "plain-ascii-text-without-escapes"),
        ("reserved", "a b&c=d?e#f%g+h"),
        ("cyrillic", "Россия/Москва"),
    ];

    for (name, text) in test_cases {
        let encoded = encode(text, Encoding::FULL).into_owned();
        group.bench_with_input(BenchmarkId::new("encode", name), &text, |b, text| {
            b.iter(|| encode(black_box(text), Encoding::FULL));
        });
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
            b.iter(|| decode(black_box(encoded)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_to_string,
    bench_path_algebra,
    bench_builder,
    bench_codec,
);
criterion_main!(benches);
