use std::process;

use bytesize::ByteSize;
use clap::ArgEnum;
use env_logger;
use log;

use algo_lab::{
    dataset, drain_fifo, drain_lifo, measured, merge_sort_by_key, quick_sort_by_key, sequential_search,
    BenchmarkHarness, Measurement, NameIndex, Record, DEFAULT_SIZES,
};

fn main() {
    let matches = build_arg_parser();

    let log_level: LogLevel = matches.value_of_t_or_exit("log_level");
    init_logger(log_level);

    let size: usize = matches.value_of_t_or_exit("size");
    let seed: u64 = matches.value_of_t_or_exit("seed");
    let records = dataset::synthetic(size, seed);

    match matches.subcommand() {
        Some(("show", _)) => show(&records),
        Some(("queue", _)) => queue(&records),
        Some(("stack", _)) => stack(&records),
        Some(("search-seq", sub)) => {
            search_seq(&records, sub.value_of("target").expect("value is required"))
        }
        Some(("search-bin", sub)) => {
            search_bin(&records, sub.value_of("target").expect("value is required"))
        }
        Some(("sort-merge", _)) => sort_merge(&records),
        Some(("sort-quick", _)) => sort_quick(&records),
        Some(("bench", sub)) => {
            let sizes = match sub.value_of("sizes") {
                Some(sizes) => parse_sizes(sizes).expect("value is pre-validated"),
                None => DEFAULT_SIZES.to_vec(),
            };
            bench(seed, &sizes, sub.is_present("json"));
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn show(records: &[Record]) {
    println!("--- generated records ---");
    for record in records {
        println!("{}", record);
    }
}

fn queue(records: &[Record]) {
    println!("--- queue (chronological order) ---");
    let (consumed, measurement) = run_measured(|| drain_fifo(records));
    for record in &consumed {
        println!("consumed: {}", record);
    }
    print_measurement(&measurement);
}

fn stack(records: &[Record]) {
    println!("--- stack (most recent first) ---");
    let (consumed, measurement) = run_measured(|| drain_lifo(records));
    for record in &consumed {
        println!("consumed: {}", record);
    }
    print_measurement(&measurement);
}

fn search_seq(records: &[Record], target: &str) {
    println!("--- sequential search ---");
    println!("list: original (unsorted), {} records", records.len());
    println!("target: {:?}", target);

    let (report, measurement) = run_measured(|| sequential_search(records, target));

    println!("comparisons: {}", report.comparisons);
    match report.index {
        Some(index) => {
            println!("result: FOUND at index {} of the original list", index);
            println!("record: {}", records[index]);
        }
        None => println!("result: NOT FOUND"),
    }
    print_measurement(&measurement);
}

fn search_bin(records: &[Record], target: &str) {
    println!("--- binary search ---");
    println!("list: sorted ascending by name, {} records", records.len());
    println!("target: {:?}", target);

    let index = NameIndex::new(records);
    let (outcome, measurement) = run_measured(|| index.search(target));

    println!("iterations: {}", outcome.probe.iterations);
    println!(
        "comparisons: {} equality | {} order",
        outcome.probe.eq_comparisons, outcome.probe.ord_comparisons
    );
    match (outcome.probe.index, outcome.original_index) {
        (Some(pos), Some(original)) => {
            println!("result: FOUND at position {} of the sorted list", pos);
            println!("position in the original list: {}", original);
            println!("record: {}", records[original]);
        }
        _ => println!("result: NOT FOUND"),
    }
    print_measurement(&measurement);
}

fn sort_merge(records: &[Record]) {
    println!("--- sorted by quantity (merge sort) ---");
    let (sorted, measurement) = run_measured(|| merge_sort_by_key(records, |r| r.quantity));
    for record in &sorted {
        println!("{}", record);
    }
    print_measurement(&measurement);
}

fn sort_quick(records: &[Record]) {
    println!("--- sorted by expiry (quick sort) ---");
    let (sorted, measurement) = run_measured(|| quick_sort_by_key(records, |r| r.expiry));
    for record in &sorted {
        println!("{}", record);
    }
    print_measurement(&measurement);
}

fn bench(seed: u64, sizes: &[usize], json: bool) {
    let mut harness = BenchmarkHarness::new(|size| dataset::synthetic(size, seed));

    let table = match harness.table(sizes) {
        Ok(table) => table,
        Err(err) => {
            log::error!("benchmark run failed: {}", err);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&table) {
            Ok(serialized) => println!("{}", serialized),
            Err(err) => {
                log::error!("benchmark table serialization failed: {}", err);
                process::exit(1);
            }
        }
    } else {
        println!("{:<12} {:>8} {:>14} {:>12}", "algorithm", "size", "mean time (s)", "mean peak");
        for entry in &table {
            println!(
                "{:<12} {:>8} {:>14.6} {:>12}",
                entry.algorithm,
                entry.size,
                entry.mean_elapsed_secs,
                ByteSize::b(entry.mean_peak_bytes as u64)
            );
        }
    }
}

fn run_measured<T>(op: impl FnOnce() -> T) -> (T, Measurement) {
    match measured(op) {
        Ok(result) => result,
        Err(err) => {
            log::error!("measurement failed: {}", err);
            process::exit(1);
        }
    }
}

fn print_measurement(measurement: &Measurement) {
    println!("elapsed: {:.6} s", measurement.elapsed.as_secs_f64());
    println!(
        "memory: {:.2} KiB current | {:.2} KiB peak",
        measurement.current_kib(),
        measurement.peak_kib()
    );
}

fn parse_sizes(value: &str) -> Result<Vec<usize>, String> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|err| format!("size format incorrect: {}", err))
        })
        .collect()
}

#[derive(Copy, Clone, clap::ArgEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn possible_values() -> impl Iterator<Item = clap::PossibleValue<'static>> {
        Self::value_variants().iter().filter_map(|v| v.to_possible_value())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogLevel as clap::ArgEnum>::from_str(s, false)
    }
}

fn build_arg_parser() -> clap::ArgMatches {
    clap::App::new("algo-lab")
        .about("instrumented classic algorithms over synthetic consumption records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            clap::Arg::new("log_level")
                .short('l')
                .long("loglevel")
                .help("logging level")
                .takes_value(true)
                .default_value("warn")
                .possible_values(LogLevel::possible_values()),
        )
        .arg(
            clap::Arg::new("size")
                .short('n')
                .long("size")
                .help("number of records to generate")
                .takes_value(true)
                .default_value("10")
                .validator(|v| match v.parse::<usize>() {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("size format incorrect: {}", err)),
                }),
        )
        .arg(
            clap::Arg::new("seed")
                .short('s')
                .long("seed")
                .help("RNG seed for the synthetic dataset")
                .takes_value(true)
                .default_value("42")
                .validator(|v| match v.parse::<u64>() {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("seed format incorrect: {}", err)),
                }),
        )
        .subcommand(clap::App::new("show").about("print the generated records"))
        .subcommand(clap::App::new("queue").about("drain the records in FIFO order"))
        .subcommand(clap::App::new("stack").about("drain the records in LIFO order"))
        .subcommand(
            clap::App::new("search-seq")
                .about("sequential search by name over the unsorted records")
                .arg(
                    clap::Arg::new("target")
                        .short('t')
                        .long("target")
                        .help("name to search for")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            clap::App::new("search-bin")
                .about("binary search by name over a name-sorted view")
                .arg(
                    clap::Arg::new("target")
                        .short('t')
                        .long("target")
                        .help("name to search for")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(clap::App::new("sort-merge").about("merge sort the records by quantity"))
        .subcommand(clap::App::new("sort-quick").about("quick sort the records by expiry"))
        .subcommand(
            clap::App::new("bench")
                .about("benchmark both sorts across input sizes")
                .arg(
                    clap::Arg::new("sizes")
                        .long("sizes")
                        .help("comma-separated input sizes")
                        .takes_value(true)
                        .validator(|v| parse_sizes(v).map(|_| ())),
                )
                .arg(
                    clap::Arg::new("json")
                        .long("json")
                        .help("emit the benchmark table as JSON")
                        .takes_value(false),
                ),
        )
        .get_matches()
}

fn init_logger(log_level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(match log_level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        })
        .format_timestamp_millis()
        .init();
}
