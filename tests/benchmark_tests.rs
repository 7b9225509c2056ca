mod common;

use std::thread;
use std::time::Duration;

use benchlog::module::register_module;
use benchlog::{BenchmarkSuite, ScopedBenchmark, Severity, Sink, DEFAULT_PRECISION};
use common::capture_sink;

/// Splits a rendered chart row into its label and time cells.
fn cells(row: &str) -> (&str, &str) {
    let (label, time) = row.split_once(" | ").expect("row without column separator");
    (label, time)
}

fn parse_time(cell: &str) -> f64 {
    cell.trim().parse().expect("time cell is not a number")
}

#[test]
fn test_chart_layout() {
    let suite = BenchmarkSuite::new("startup");
    suite.add_case("parse", 0.25);
    suite.add_case("build index", 1.5);

    let chart = suite.render();
    assert!(chart.ends_with('\n'));
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 7);

    // "build index" is the widest label.
    assert_eq!(lines[0], "startup     | time (sec)");
    assert_eq!(lines[1], format!("{}-+-{}", "-".repeat(11), "-".repeat(10)));
    assert_eq!(lines[4], lines[1]);

    let (label, time) = cells(lines[2]);
    assert_eq!(label, "parse      ");
    assert_eq!(time, "   0.25000");
    let (label, time) = cells(lines[3]);
    assert_eq!(label, "build index");
    assert_eq!(time, "   1.50000");
    assert_eq!(cells(lines[5]).0, "(other)    ");
    assert_eq!(cells(lines[6]).0, "total      ");
}

#[test]
fn test_rows_are_aligned() {
    let suite = BenchmarkSuite::new("t");
    suite.add_case("a", 0.001);
    suite.add_case("a much longer label", 12345.5);

    let chart = suite.render();
    let bars: Vec<usize> = chart.lines().filter_map(|line| line.find(" | ")).collect();
    assert_eq!(bars.len(), 5);
    assert!(bars.iter().all(|&column| column == bars[0]));

    let widths: Vec<usize> = chart
        .lines()
        .skip(1)
        .filter(|line| line.contains(" | "))
        .map(|line| line.len())
        .collect();
    assert!(widths.iter().all(|&width| width == widths[0]), "{}", chart);
}

#[test]
fn test_other_and_total_rows() {
    let suite = BenchmarkSuite::new("sum");
    suite.add_case("first", 0.5);
    suite.add_case("second", 0.25);
    thread::sleep(Duration::from_millis(5));

    let chart = suite.render();
    let lines: Vec<&str> = chart.lines().collect();
    let other = parse_time(cells(lines[5]).1);
    let total = parse_time(cells(lines[6]).1);

    assert!(total >= 0.005);
    assert!(other < 0.0, "cases were not timed by the suite clock");
    let tolerance = 2.0 * 10f64.powi(-(DEFAULT_PRECISION as i32));
    assert!((0.75 + other - total).abs() <= tolerance);
}

#[test]
fn test_time_column_fits_widest_value() {
    let suite = BenchmarkSuite::new("wide");
    suite.add_case("huge", 123456.0);

    let chart = suite.render();
    let lines: Vec<&str> = chart.lines().collect();
    // "(other)" is negative, one character wider than the case.
    let other = cells(lines[4]).1;
    assert!(other.starts_with('-'), "{}", chart);
    assert_eq!(other.len(), "-123456.00000".len());
    assert_eq!(cells(lines[2]).1, " 123456.00000");
    assert_eq!(lines[1].len(), lines[2].len());
    assert_eq!(lines[4].len(), lines[2].len());
    assert_eq!(lines[5].len(), lines[2].len());
}

#[test]
fn test_empty_suite() {
    let suite = BenchmarkSuite::new("empty");
    assert!(suite.is_empty());

    let chart = suite.render();
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "empty   | time (sec)");
    assert_eq!(lines[1], lines[2]);
    assert!(lines[3].starts_with("(other) | "));
    assert!(lines[4].starts_with("total   | "));
}

#[test]
fn test_duplicate_labels_keep_order() {
    let suite = BenchmarkSuite::new("dups");
    suite.add_case("step", 0.1);
    suite.add_case("other step", 0.2);
    suite.add_case("step", 0.3);

    let labels: Vec<String> = suite.cases().into_iter().map(|(label, _)| label).collect();
    assert_eq!(labels, vec!["step", "other step", "step"]);
    assert!((suite.time_sum() - 0.6).abs() < 1e-12);
}

#[test]
fn test_concurrent_add_case() {
    let suite = BenchmarkSuite::new("threads");
    thread::scope(|scope| {
        for worker in 0..8 {
            let suite = &suite;
            scope.spawn(move || {
                for i in 0..50 {
                    suite.add_case(format!("w{}-{}", worker, i), 0.001);
                }
            });
        }
    });

    assert_eq!(suite.len(), 400);
    assert!((suite.time_sum() - 0.4).abs() < 1e-9);
}

#[test]
fn test_reset_clears_cases_and_clock() {
    let suite = BenchmarkSuite::new("reset");
    suite.add_case("x", 1.0);
    thread::sleep(Duration::from_millis(10));
    let before = suite.elapsed();

    suite.reset();
    assert!(suite.is_empty());
    assert!(suite.elapsed() < before);
}

#[test]
fn test_precision_applies_to_every_row() {
    let mut suite = BenchmarkSuite::new("prec");
    suite.set_precision(1);
    suite.add_case("x", 2.25);

    let chart = suite.render();
    for line in chart.lines().filter(|line| line.contains(" | ") && !line.starts_with("prec")) {
        let time = cells(line).1.trim();
        let fraction = time.split('.').nth(1).expect("fraction digits");
        assert_eq!(fraction.len(), 1, "{}", line);
    }
}

#[test]
fn test_log_to_writes_one_message() {
    let (sink, buffer) = capture_sink();
    let suite = BenchmarkSuite::new("chart");
    suite.add_case("a", 0.1);

    suite.log_to(&sink, Severity::Warn);

    let contents = buffer.contents();
    assert!(contents.starts_with("[WARN] chart   | time (sec)\n"));
    assert_eq!(contents.matches("[WARN]").count(), 1);
    assert!(contents.ends_with('\n') && !contents.ends_with("\n\n"));
    assert_eq!(contents.lines().count(), 6);
}

#[test]
fn test_log_to_respects_threshold() {
    let (sink, buffer) = capture_sink();
    sink.set_level(Severity::Error);
    let suite = BenchmarkSuite::new("quiet");

    suite.log_to(&sink, Severity::Info);
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_scoped_benchmark_reports_on_drop() {
    let (sink, buffer) = capture_sink();
    let suite = BenchmarkSuite::new("scoped");
    {
        let _bench = ScopedBenchmark::with_sink(&sink, "sleepy").suite(&suite);
        thread::sleep(Duration::from_millis(5));
    }

    let cases = suite.cases();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].0, "sleepy");
    assert!(cases[0].1 >= 0.005);

    let contents = buffer.contents();
    assert!(contents.starts_with("[INFO] sleepy: "), "got {:?}", contents);
    assert!(contents.ends_with(" sec\n"));
    let reported: f64 = contents["[INFO] sleepy: ".len()..contents.len() - " sec\n".len()]
        .parse()
        .unwrap();
    assert!((reported - cases[0].1).abs() < 1e-5);
}

#[test]
fn test_stop_is_idempotent() {
    let (sink, buffer) = capture_sink();
    let suite = BenchmarkSuite::new("once");

    let mut bench = ScopedBenchmark::with_sink(&sink, "step").suite(&suite);
    let first = bench.stop();
    thread::sleep(Duration::from_millis(2));
    assert_eq!(bench.stop(), first);
    assert!(bench.is_stopped());
    assert_eq!(bench.elapsed(), first);
    drop(bench);

    assert_eq!(suite.len(), 1);
    assert_eq!(buffer.lines().len(), 1);
}

#[test]
fn test_filtered_benchmark_still_records() {
    let (sink, buffer) = capture_sink();
    sink.set_level(Severity::Error);
    let suite = BenchmarkSuite::new("filtered");

    ScopedBenchmark::with_sink(&sink, "quiet")
        .suite(&suite)
        .level(Severity::Warn)
        .stop();

    assert!(buffer.contents().is_empty());
    assert_eq!(suite.len(), 1);
}

#[test]
fn test_unfilterable_report_does_not_raise() {
    let (sink, buffer) = capture_sink();
    sink.set_level(Severity::Check);

    let mut bench = ScopedBenchmark::with_sink(&sink, "critical").level(Severity::Fatal);
    bench.stop();

    assert!(buffer.contents().starts_with("[FATAL] critical: "));
}

#[test]
fn test_start_notice_and_precision() {
    let (sink, buffer) = capture_sink();
    ScopedBenchmark::with_sink(&sink, "load")
        .precision(2)
        .start_notice()
        .stop();

    let lines = buffer.lines();
    assert_eq!(lines[0], "[INFO] load: start...");
    let time = lines[1]
        .strip_prefix("[INFO] load: ")
        .and_then(|rest| rest.strip_suffix(" sec"))
        .unwrap();
    assert_eq!(time.split('.').nth(1).unwrap().len(), 2);
}

#[test]
fn test_verbose_benchmark() {
    let module = register_module("benchmark_tests::verbose");
    let (sink, buffer) = capture_sink();

    ScopedBenchmark::with_sink(&sink, "hidden").verbose(module, 1).stop();
    assert!(buffer.contents().is_empty());

    sink.set_verbosity(module, 1);
    ScopedBenchmark::with_sink(&sink, "shown").verbose(module, 1).stop();
    assert!(buffer
        .contents()
        .starts_with("[benchmark_tests::verbose(1)] shown: "));
}

#[test]
fn test_location_prefix() {
    let (sink, buffer) = capture_sink();
    ScopedBenchmark::with_sink(&sink, "here")
        .at("src/app.rs", 7)
        .stop();

    assert!(buffer.contents().starts_with("[INFO] src/app.rs(7): here: "));
}
