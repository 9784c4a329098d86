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

use qr_symbol::{ErrorCorrectionLevel, QrCodeBuilder};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data = args.join(" ");
    println!("QR code for {}", data);

    let result = QrCodeBuilder::new()
        .with_error_correction_level(ErrorCorrectionLevel::Medium)
        .build_text(data.as_str());
    match result {
        Ok(qr_code) => {
            println!(
                "version {}, level {:?}, mask {}",
                qr_code.version().value(),
                qr_code.error_correction_level(),
                qr_code.mask().value()
            );
            println!("{}", qr_code);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Unable to encode: {}", err);
            ExitCode::FAILURE
        }
    }
}
