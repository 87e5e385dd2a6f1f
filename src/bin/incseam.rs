// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgGroup, ArgMatches};
use failure::{format_err, Error};
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use incseam::{energy_to_image, CarveOptions, Field, PixelBuffer, SeamCarver};
use log::{info, LevelFilter};
use std::io::{self, Write};

// What to do once the image is loaded.
enum Mode {
    Carve,
    Energy,
    Dump(Field),
}

struct Options {
    input: String,
    output: Option<String>,
    width: Option<u32>,
    columns: Option<u32>,
    verify: bool,
    mode: Mode,
}

fn parse_count(matches: &ArgMatches, name: &str) -> Result<Option<u32>, Error> {
    matches
        .value_of(name)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| format_err!("--{} expects a whole number, got '{}'", name, v))
        })
        .transpose()
}

fn options() -> Result<Options, Error> {
    let matches = App::new("incseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by incremental seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .help("Carve down to this many columns"),
        )
        .arg(
            Arg::with_name("columns")
                .short("c")
                .long("columns")
                .takes_value(true)
                .help("Carve away this many columns"),
        )
        .group(
            ArgGroup::with_name("amount")
                .args(&["width", "columns"])
                .required(false),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Write the result here (format from the extension); PNM on stdout otherwise"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .conflicts_with_all(&["amount", "dump"])
                .help("Write the energy map of the input as a graymap instead of carving"),
        )
        .arg(
            Arg::with_name("dump")
                .long("dump")
                .takes_value(true)
                .possible_values(&incseam::dump::FIELD_NAMES)
                .help("Print one field of the carved image as a text grid"),
        )
        .arg(
            Arg::with_name("verify")
                .long("verify")
                .help("Check every incremental update against a full rebuild"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_default())
        .init();

    let mode = if matches.is_present("energy") {
        Mode::Energy
    } else if let Some(field) = matches.value_of("dump") {
        Mode::Dump(field.parse::<Field>().map_err(|e| format_err!("{}", e))?)
    } else {
        Mode::Carve
    };

    let width = parse_count(&matches, "width")?;
    let columns = parse_count(&matches, "columns")?;
    if let Mode::Carve = mode {
        if width.is_none() && columns.is_none() {
            return Err(format_err!("one of --width or --columns is required"));
        }
    }

    Ok(Options {
        input: matches.value_of("input").unwrap_or_default().to_string(),
        output: matches.value_of("output").map(String::from),
        width,
        columns,
        verify: matches.is_present("verify"),
        mode,
    })
}

fn write_pnm(data: &[u8], width: u32, height: u32, subtype: PNMSubtype, color: ColorType) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    PNMEncoder::new(&mut out)
        .with_subtype(subtype)
        .encode(data, width, height, color)?;
    out.flush()?;
    Ok(())
}

fn run(opts: Options) -> Result<(), Error> {
    let source = image::open(&opts.input)?.to_rgb();
    let image = PixelBuffer::from_view(&source)?;
    let mut carver = SeamCarver::with_options(image, CarveOptions { verify: opts.verify })?;

    if let Mode::Energy = opts.mode {
        let map = energy_to_image(carver.matrix());
        let (width, height) = map.dimensions();
        return match opts.output {
            Some(path) => Ok(map.save(path)?),
            None => write_pnm(
                &map.into_raw(),
                width,
                height,
                PNMSubtype::Graymap(SampleEncoding::Binary),
                ColorType::Gray(8),
            ),
        };
    }

    if let Some(width) = opts.width {
        carver.carve_to(width)?;
    } else if let Some(columns) = opts.columns {
        carver.carve_columns(columns)?;
    }
    info!("finished at {}x{}", carver.width(), carver.height());

    if let Mode::Dump(field) = opts.mode {
        println!("{}", carver.dump(field));
        return Ok(());
    }

    let result = carver.into_buffer().to_image();
    let (width, height) = result.dimensions();
    match opts.output {
        Some(path) => Ok(result.save(path)?),
        None => write_pnm(
            &result.into_raw(),
            width,
            height,
            PNMSubtype::Pixmap(SampleEncoding::Binary),
            ColorType::RGB(8),
        ),
    }
}

fn main() {
    if let Err(err) = options().and_then(run) {
        eprintln!("incseam: {}", err);
        std::process::exit(1);
    }
}
