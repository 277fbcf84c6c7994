
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate regex;
extern crate term_grid;
extern crate thiserror;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use assembler::symbols::CODE_START;
use assembler::Assembly;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let verbose = args.is_present("verbose");
    debug!("Arguments:\n\tVerbose: {}\n\tOutfile: {}\n\tInfile: {}",
        verbose,
        args.value_of("output").unwrap_or("<stdout>"),
        args.value_of("INPUT").unwrap_or("")
    );

    let ifile = args.value_of("INPUT").unwrap_or("");
    let ipath = Path::new(ifile);

    let source = match read_source(ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(source) => source,
    };

    let mut asm = assembler::Assembler::new();
    let assembly = match asm.run(&source) {
        Err(err) => {
            error!("fatal: {}:{}: {}", ipath.display(), err.line(), err);
            debug!("assembler stopped in stage {:?}", asm.stage());
            std::process::exit(1);
        },
        Ok(assembly) => assembly,
    };

    info!("assembled {} instruction(s) from `{}`", assembly.words.len(), ipath.display());
    if !assembly.divergent_lines.is_empty() {
        warn!("{} line(s) assembled at a different address than the label pass assumed: {:?}",
            assembly.divergent_lines.len(), assembly.divergent_lines);
    }

    if verbose {
        print_trace(ipath, &assembly);
        return;
    }

    let mut ofile: Box<dyn Write> = match args.value_of("output") {
        Some(filename) => {
            let opath = Path::new(filename);
            match File::create(&opath) {
                Err(err) => {
                    error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
                    std::process::exit(1);
                },
                Ok(file) => Box::new(BufWriter::new(file)),
            }
        },
        None => Box::new(BufWriter::new(io::stdout())),
    };

    if let Err(err) = write_words(&mut ofile, &assembly) {
        error!("fatal: unable to write output: {}", err);
        std::process::exit(1);
    }
}

fn read_source(path: &Path) -> io::Result<String> {
    let mut source = String::new();
    File::open(path)?.read_to_string(&mut source)?;
    Ok(source)
}

/// Writes one line of opcode, F and D bits per instruction.
fn write_words<W: Write + ?Sized>(out: &mut W, assembly: &Assembly) -> io::Result<()> {
    for assembled in assembly.words.iter() {
        writeln!(out, "{}", assembled.word)?;
    }
    out.flush()
}

fn print_trace(ipath: &Path, assembly: &Assembly) {
    println!("Assembling {} ...", ipath.display());
    println!("Code origin: @{}", CODE_START);
    println!("----------");

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(2),
        direction:   Direction::LeftToRight,
    });

    for assembled in assembly.words.iter() {
        let word = &assembled.word;
        grid.add(Cell::from(format!("{:<3}", word.mnemonic.to_string())));
        grid.add(Cell::from(format!("{:>4}", word.opcode_bits())));
        grid.add(Cell::from(format!("{:>7} ({:>3})", word.f_bits(), word.f)));
        grid.add(Cell::from(format!("{:>7} ({:>3})", word.d_bits(), word.d)));
        grid.add(Cell::from(format!("0x{:04X}", word.to_u16())));
    }

    print!("{}", grid.fit_into_columns(5));
    println!("----------");

    let symbols = &assembly.symbols;
    print_symbols("Labels:", &symbols.labels());
    print_symbols("Declared variables (data segment):", &symbols.variables());
    print_symbols("Constants used (data segment):", &symbols.constants());
}

fn print_symbols(title: &str, entries: &[(&str, u32)]) {
    println!("\n{}", title);
    for (name, address) in entries {
        println!("@{}\t{}", address, name);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("msasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Source file to assemble")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .multiple(true)
            .takes_value(false)
            .help("Print an assembly trace instead of machine code; repeat to raise log verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .takes_value(true)
            .value_name("FILE")
            .help("write machine code to FILE instead of stdout"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply().ok();
}
