use std::thread;
use std::time::Duration;

use benchlog::{benchmark, log, module_tag, vlog, BenchmarkSuite, Config, Severity};

module_tag!(DEMO = "demo");

// Small demo: a few log lines and a chart on stderr.
fn main() {
    Config::new().level(Severity::Info).verbosity(&DEMO, 1).apply();

    let suite = BenchmarkSuite::new("demo");
    log!("running ", 3, " cases");

    benchmark!("sleep 10ms", suite => { thread::sleep(Duration::from_millis(10)) });
    benchmark!("sleep 20ms", suite => { thread::sleep(Duration::from_millis(20)) });

    thread::scope(|scope| {
        scope.spawn(|| {
            let _bench = benchmark!("worker", suite).verbose(&DEMO, 1);
            let total: u64 = (0..1_000_000u64).sum();
            vlog!(DEMO, 1; "worker sum ", total);
        });
    });

    suite.log(Severity::Info);
    benchlog::shutdown();
}
