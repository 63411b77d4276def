// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the printer-list parsers in the directprint-print
// crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use directprint_print::enumerator::{
    parse_lpstat, parse_powershell_json, parse_system_profiler, parse_wmic_table,
};

const PRINTER_COUNT: usize = 64;

// ---------------------------------------------------------------------------
// Fixtures: command output for a host with many queues
// ---------------------------------------------------------------------------

fn powershell_output() -> String {
    let records: Vec<String> = (0..PRINTER_COUNT)
        .map(|i| format!("    {{\n        \"Name\":  \"Office Printer {i}\"\n    }}"))
        .collect();
    format!("[\n{}\n]\n", records.join(",\n"))
}

fn wmic_output() -> String {
    let mut out = String::from("Name                         \r\r\n");
    for i in 0..PRINTER_COUNT {
        out.push_str(&format!("Office Printer {i}             \r\r\n"));
    }
    out
}

fn lpstat_output() -> String {
    (0..PRINTER_COUNT)
        .map(|i| format!("printer office_{i} is idle.  enabled since Mon 12 Oct 2026 09:00:00\n"))
        .collect()
}

fn system_profiler_output() -> String {
    let mut out = String::from("Printers:\n\n");
    for i in 0..PRINTER_COUNT {
        out.push_str(&format!(
            "    Office Printer {i}:\n\n      Name: Office Printer {i}\n      Status: Idle\n\n"
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_parsers(c: &mut Criterion) {
    let powershell = powershell_output();
    let wmic = wmic_output();
    let lpstat = lpstat_output();
    let profiler = system_profiler_output();

    c.bench_function("parse_powershell_json_64", |b| {
        b.iter(|| parse_powershell_json(black_box(&powershell)))
    });
    c.bench_function("parse_wmic_table_64", |b| {
        b.iter(|| parse_wmic_table(black_box(&wmic)))
    });
    c.bench_function("parse_lpstat_64", |b| {
        b.iter(|| parse_lpstat(black_box(&lpstat)))
    });
    c.bench_function("parse_system_profiler_64", |b| {
        b.iter(|| parse_system_profiler(black_box(&profiler)))
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
