//! Demand-paging simulator - Main Entry Point
//!
//! Usage: demand-paging [OPTIONS] <backing_store> <address_file>
//!
//! Arguments:
//!   backing_store - Binary file holding every logical page back to back
//!   address_file  - One logical address per line
//!
//! Options:
//!   -f, --frames N       Number of physical frames (default 64)
//!   -t, --tlb N          TLB entries (default 16)
//!   -p, --policy NAME    Replacement policy: fifo | noop (default fifo)
//!       --unconstrained  One frame per page, no replacement pressure
//!   -d, --detail         Print virtual/physical address alongside each value
//!   -o, --output FILE    Write values to FILE; the report stays on stdout
//!   -v, --verbose        Log page faults (-vv: every translation)
//!   -h, --help           Print help information

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use log::{LevelFilter, info};

use demand_paging::io::{AddressReader, write_report, write_translation};
use demand_paging::logger::StderrLogger;
use demand_paging::{FileBackingStore, PolicyKind, VmConfig, VmError, VmManager};

/// Command-line configuration
struct Options {
    backing_store: String,
    address_file: String,
    output_file: Option<String>,
    vm: VmConfig,
    detail: bool,
    log_level: LevelFilter,
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = StderrLogger::new(options.log_level).init() {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Demand-paging simulator - translates logical addresses through a TLB and page table");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] <backing_store> <address_file>", program);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  backing_store - Binary file holding every logical page back to back");
    eprintln!("  address_file  - File with one logical address per line");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --frames N       Number of physical frames (default 64)");
    eprintln!("  -t, --tlb N          TLB entries (default 16)");
    eprintln!("  -p, --policy NAME    Replacement policy: fifo | noop (default fifo)");
    eprintln!("      --unconstrained  One frame per page, no replacement pressure");
    eprintln!("  -d, --detail         Print virtual/physical address alongside each value");
    eprintln!("  -o, --output FILE    Write values to FILE; the report stays on stdout");
    eprintln!("  -v, --verbose        Log page faults (-vv: every translation)");
    eprintln!("  -h, --help           Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} BACKING_STORE.bin addresses.txt", program);
    eprintln!("  {} -f 128 -d BACKING_STORE.bin addresses.txt", program);
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("demand-paging");

    let mut vm = VmConfig::default();
    let mut output_file = None;
    let mut detail = false;
    let mut verbosity = 0;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => verbosity += 1,
            "-vv" => verbosity += 2,
            "-d" | "--detail" => detail = true,
            "--unconstrained" => vm.frame_count = vm.page_table_size,
            "-f" | "--frames" => vm.frame_count = parse_count(arg, iter.next())?,
            "-t" | "--tlb" => vm.tlb_capacity = parse_count(arg, iter.next())?,
            "-p" | "--policy" => {
                let name = iter.next().ok_or_else(|| format!("{} needs a value", arg))?;
                vm.policy = name.parse::<PolicyKind>().map_err(|e| e.to_string())?;
            }
            "-o" | "--output" => {
                let path = iter.next().ok_or_else(|| format!("{} needs a value", arg))?;
                output_file = Some(path.clone());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}\nUse --help for usage information.", arg));
            }
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        print_help(program);
        return Err(format!("\nError: Expected 2 arguments, got {}", positional.len()));
    }

    let log_level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Ok(Options {
        backing_store: positional[0].clone(),
        address_file: positional[1].clone(),
        output_file,
        vm,
        detail,
        log_level,
    })
}

fn parse_count(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a number, got `{}`", flag, value))
}

/// Main logic separated from main() for cleaner error handling
fn run(options: &Options) -> Result<(), VmError> {
    let store = FileBackingStore::open(&options.backing_store, options.vm.page_size)?;
    let mut vm = VmManager::new(options.vm, store)?;
    let addresses = AddressReader::open(&options.address_file)?;

    let mut out: Box<dyn Write> = match &options.output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for raw in addresses {
        let translation = vm.translate(raw?)?;
        write_translation(&mut out, &translation, options.detail)?;
    }

    let stats = vm.statistics();
    if options.output_file.is_some() {
        out.flush()?;
        write_report(&mut io::stdout().lock(), &stats)?;
    } else {
        write_report(&mut out, &stats)?;
        out.flush()?;
    }

    info!(
        "{} translations, {} evictions, {} frames still free",
        stats.translations,
        stats.evictions,
        vm.free_frames()
    );
    Ok(())
}
