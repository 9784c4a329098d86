/* Copyright (C) 2021 Casper Meijn <casper@meijn.net>
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qr_symbol::{ErrorCorrectionLevel, Mask, QrCode, QrCodeBuilder, ReedSolomonGenerator};

fn benchmark_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encode text");

    for len in [10, 100, 500, 2_000].iter() {
        let digits: String = "0123456789".chars().cycle().take(*len).collect();
        group.bench_with_input(BenchmarkId::new("Numeric", len), &digits, |b, text| {
            b.iter(|| QrCode::encode_text(black_box(text), ErrorCorrectionLevel::Medium))
        });

        let bytes: String = "qr-symbol ".chars().cycle().take(*len).collect();
        group.bench_with_input(BenchmarkId::new("Byte", len), &bytes, |b, text| {
            b.iter(|| QrCode::encode_text(black_box(text), ErrorCorrectionLevel::Medium))
        });
    }
    group.finish();
}

fn benchmark_mask_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mask selection");
    let text = "https://github.com/caspermeijn/tiny-qr";

    group.bench_function("Automatic", |b| {
        b.iter(|| QrCodeBuilder::new().build_text(black_box(text)))
    });

    let forced = QrCodeBuilder::new().with_mask(Mask::new(0).ok());
    group.bench_function("Forced", |b| b.iter(|| forced.build_text(black_box(text))));
    group.finish();
}

fn benchmark_reed_solomon(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reed-Solomon");
    let data: Vec<u8> = (0..=255).cycle().take(153).collect();

    for degree in [7, 18, 30].iter() {
        let generator = ReedSolomonGenerator::new(*degree).unwrap();
        group.bench_with_input(BenchmarkId::new("Remainder", degree), degree, |b, _| {
            b.iter(|| generator.remainder(black_box(&data)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_text,
    benchmark_mask_selection,
    benchmark_reed_solomon
);
criterion_main!(benches);
