use clap::{App, Arg};
use fontinstancer::instancer::instantiate_variable_font;
use fontinstancer::InstancerOptions;
use instancer_cli::{open_font, parse_limits, save_font};
use std::path::{Path, PathBuf};
use std::process::exit;

fn main() {
    let matches = App::new("instancer")
        .about("Partially or fully instantiate variable fonts")
        .arg(Arg::from_usage("-o, --output=[FILE]  Output font document"))
        .arg(Arg::from_usage(
            "--no-optimize        Dont re-encode the surviving outline deltas",
        ))
        .arg(Arg::from_usage(
            "--no-overlap-flag    Dont set OVERLAP_SIMPLE/OVERLAP_COMPOUND glyf flags",
        ))
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .required(false)
                .help("Run more verbosely"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The font document to instance")
                .required(true),
        )
        .arg(
            Arg::with_name("loc-args")
                .help("List of space separated locations. A location consists of the tag of a variation axis, followed by '=' and one of number, number:number or the literal string 'drop'. E.g.: wdth=100 or wght=75.0:125.0 or wght=drop")
                .multiple(true)
                .required(true),
        )
        .get_matches();

    if matches.is_present("verbose") {
        simple_logger::init_with_level(log::Level::Debug).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Warn).unwrap();
    }

    let input = matches.value_of("INPUT").unwrap();
    if !Path::new(input).exists() {
        eprintln!("No such file '{}'", input);
        exit(2);
    }

    let locargs: Vec<&str> = matches.values_of("loc-args").unwrap().collect();
    let limits = match parse_limits(&locargs) {
        Ok(limits) => limits,
        Err(error) => {
            eprintln!("{}", error);
            exit(2);
        }
    };
    log::debug!("Axis limits = {:?}", limits);

    let mut font = match open_font(Path::new(input)) {
        Ok(font) => font,
        Err(error) => {
            eprintln!("Couldn't read {}: {}", input, error);
            exit(2);
        }
    };
    if !font.is_variable() {
        eprintln!("This isn't a variable font");
        exit(2);
    }

    let options = InstancerOptions {
        optimize: !matches.is_present("no-optimize"),
        overlap_flag: !matches.is_present("no-overlap-flag"),
    };
    if let Err(error) = instantiate_variable_font(&mut font, limits, &options) {
        eprintln!("{}", error);
        exit(2);
    }

    let out_path: PathBuf = match matches.value_of("output") {
        Some(output) => PathBuf::from(output),
        None => Path::new(input).with_extension("instance.json"),
    };
    log::info!("Saving on {}", out_path.display());
    if let Err(error) = save_font(&font, &out_path) {
        eprintln!("Couldn't write {}: {}", out_path.display(), error);
        exit(2);
    }
}
