use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jsontext::{JsonReader, JsonWriter, WriterOptions};

/// Builds a medium-sized document with a mix of strings, numbers, and
/// nesting.
fn sample_document(records: usize) -> String {
    let mut writer = JsonWriter::new(WriterOptions::default());
    writer.write_array_start().unwrap();
    for i in 0..records {
        writer.write_object_start().unwrap();
        writer.write_property_name("id").unwrap();
        writer.write_int(i as i32).unwrap();
        writer.write_property_name("label").unwrap();
        writer.write_string(&format!("record-{i} \u{00E9}")).unwrap();
        writer.write_property_name("score").unwrap();
        writer.write_double(i as f64 * 0.5).unwrap();
        writer.write_property_name("tags").unwrap();
        writer.write_array_start().unwrap();
        writer.write_string("a").unwrap();
        writer.write_string("b").unwrap();
        writer.write_array_end().unwrap();
        writer.write_object_end().unwrap();
    }
    writer.write_array_end().unwrap();
    writer.into_string()
}

fn bench_reader(c: &mut Criterion) {
    let text = sample_document(1_000);
    let mut group = c.benchmark_group("reader");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("pull_events", |b| {
        b.iter(|| {
            let mut events = 0usize;
            let mut reader = JsonReader::from_string(black_box(text.as_str()));
            while reader.read().unwrap() {
                events += 1;
            }
            black_box(events)
        });
    });
    group.finish();
}

fn bench_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer");
    group.bench_function("render_records", |b| {
        b.iter(|| black_box(sample_document(1_000)));
    });
    group.finish();
}

criterion_group!(benches, bench_reader, bench_writer);
criterion_main!(benches);
