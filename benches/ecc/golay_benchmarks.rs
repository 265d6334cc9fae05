use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use golay_barcodes::ecc::nucleotide::bits_to_string;
use golay_barcodes::ecc::{GolayDecoder, GolayMatrices, SyndromeTable};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

/// Random codewords with `flips` distinct bits inverted, rendered as barcodes
fn corrupted_barcodes(decoder: &GolayDecoder, flips: usize, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let codeword = decoder.encode(rng.gen_range(0..4096)).unwrap();
            let error = sample(&mut rng, 24, flips)
                .into_iter()
                .fold(0u32, |acc, i| acc | 1 << i);
            bits_to_string(codeword ^ error)
        })
        .collect()
}

fn bench_table_construction(c: &mut Criterion) {
    let matrices = GolayMatrices::default();
    c.bench_function("syndrome_table_new", |b| {
        b.iter(|| SyndromeTable::new(black_box(&matrices)).unwrap())
    });
}

fn bench_decode_bits(c: &mut Criterion) {
    let decoder = GolayDecoder::new();
    let codeword = decoder.encode(666).unwrap();

    let mut group = c.benchmark_group("decode_bits");
    for (name, received) in [
        ("clean", codeword),
        ("three_errors", codeword ^ 0x40_0081),
        ("uncorrectable", codeword ^ 0x00_000F),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &received, |b, &r| {
            b.iter(|| decoder.decode_bits(black_box(r)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let decoder = GolayDecoder::new();

    let mut group = c.benchmark_group("decode");
    for flips in [0, 1, 2, 3, 4] {
        let barcodes = corrupted_barcodes(&decoder, flips, 1_000);
        group.bench_with_input(BenchmarkId::new("bit_flips", flips), &barcodes, |b, barcodes| {
            b.iter(|| {
                for barcode in barcodes {
                    black_box(decoder.decode(barcode).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_decode_many(c: &mut Criterion) {
    let decoder = GolayDecoder::new();
    let barcodes = corrupted_barcodes(&decoder, 2, 100_000);
    c.bench_function("decode_many_100k", |b| {
        b.iter(|| decoder.decode_many(black_box(&barcodes)))
    });
}

criterion_group!(
    benches,
    bench_table_construction,
    bench_decode_bits,
    bench_decode,
    bench_decode_many
);
criterion_main!(benches);
