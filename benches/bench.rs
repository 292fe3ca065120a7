use criterion::{Criterion, criterion_group, criterion_main};
use fretboard::ScaleData;
use fretboard::catalog::Catalog;
use fretboard::fretboard::{FretboardMap, Tuning};
use fretboard::path::diagonal_run;
use fretboard::pitch::PitchClass;
use fretboard::scale::generate_scale;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let catalog = Catalog::standard();
    c.bench_function("ScaleData (G major)", |b| {
        b.iter(|| ScaleData::generate(black_box("G"), black_box("Major"), catalog))
    });
    c.bench_function("ScaleData (F# hungarian minor)", |b| {
        b.iter(|| ScaleData::generate(black_box("F#"), black_box("Hungarian Minor"), catalog))
    });

    let scale = generate_scale(PitchClass::E, "Natural Minor", catalog).unwrap();
    let map = FretboardMap::populate(&Tuning::standard(), &scale);
    c.bench_function("diagonal run (E minor)", |b| b.iter(|| diagonal_run(black_box(&map))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
