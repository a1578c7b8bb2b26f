use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loglens::file_handler::{Document, LineIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tempfile::NamedTempFile;

const LEVELS: [&str; 4] = ["INFO", "WARN", "DEBUG", "ERROR"];

fn generate_log(size_kb: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let target = size_kb * 1024;
    let mut content = Vec::with_capacity(target + 256);
    let mut line_num = 0u64;

    while content.len() < target {
        let level = LEVELS[rng.gen_range(0..LEVELS.len())];
        let payload = rng.gen_range(10..400);
        writeln!(
            content,
            "[2024-09-02T10:{:02}:{:02}] {} request {} {}",
            (line_num / 60) % 60,
            line_num % 60,
            level,
            line_num,
            "x".repeat(payload)
        )
        .unwrap();
        line_num += 1;
    }
    content
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_index_build");
    group.sample_size(20);

    for &size_kb in &[64, 1024, 8192] {
        let content = generate_log(size_kb, 7);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}KB", size_kb)), &content, |b, content| {
            b.iter(|| {
                let index = LineIndex::build(content.as_slice()).unwrap();
                black_box(index.len());
            });
        });
    }
    group.finish();
}

fn bench_document_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_open");
    group.sample_size(10);

    for &size_kb in &[1024, 16384] {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&generate_log(size_kb, 11)).unwrap();
        file.flush().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(format!("{}KB", size_kb)), &file.path(), |b, path| {
            b.iter(|| {
                let document = Document::open(path).unwrap();
                black_box(document.total_lines());
            });
        });
    }
    group.finish();
}

fn bench_random_line_reads(c: &mut Criterion) {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&generate_log(8192, 3)).unwrap();
    file.flush().unwrap();
    let document = Document::open(file.path()).unwrap();
    let total = document.total_lines();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("read_lines_random_page", |b| {
        b.iter(|| {
            let start = rng.gen_range(0..total);
            black_box(document.read_lines(start, 80).unwrap());
        });
    });
}

criterion_group!(benches, bench_index_build, bench_document_open, bench_random_line_reads);
criterion_main!(benches);
