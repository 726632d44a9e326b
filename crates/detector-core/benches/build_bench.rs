// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Apparatus Assembly Benchmarks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use detector_core::apparatus::{build_apparatus, hpge_spectrometer};
use detector_core::geometry::GeometryBuilder;
use detector_core::materials::MaterialCatalog;
use detector_core::solids::Solid;
use nalgebra::Vector3;
use std::hint::black_box;

fn bench_hpge_assembly(c: &mut Criterion) {
    let config = hpge_spectrometer();
    c.bench_function("build_hpge_apparatus", |b| {
        b.iter(|| {
            let apparatus = build_apparatus(black_box(&config)).unwrap();
            black_box(apparatus.tree.len())
        })
    });
}

fn bench_wide_tree(c: &mut Criterion) {
    c.bench_function("place_512_siblings", |b| {
        b.iter(|| {
            let mut catalog = MaterialCatalog::new();
            let air = catalog.resolve_predefined("G4_AIR").unwrap();
            let mut builder = GeometryBuilder::new();
            let world = builder
                .create_world(
                    Solid::make_box("World", 500.0, 500.0, 500.0).unwrap(),
                    air.clone(),
                )
                .unwrap();
            for i in 0..512 {
                let name = format!("Cell{i}");
                let solid = Solid::make_box(&name, 0.5, 0.5, 0.5).unwrap();
                builder
                    .place(
                        &name,
                        solid,
                        air.clone(),
                        false,
                        Vector3::new(i as f64 - 256.0, 0.0, 0.0),
                        None,
                        world,
                    )
                    .unwrap();
            }
            black_box(builder.finalize().unwrap().len())
        })
    });
}

criterion_group!(benches, bench_hpge_assembly, bench_wide_tree);
criterion_main!(benches);
