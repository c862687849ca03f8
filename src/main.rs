use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use cineon::{render_header, Cineon, CineonError, Mode};
use log::debug;
use structopt::StructOpt;
use thiserror::Error;

const USAGE: &str = "usage: cineonheader [-xX] file.cin
       -x xml format
       -X xml format without declaration line";

#[derive(StructOpt, Debug)]
#[structopt(name = "cineonheader")]
/// Prints the header of a Cineon image
struct Opt {
    /// XML format
    #[structopt(short = "x", conflicts_with = "xml-bare")]
    xml: bool,
    /// XML format without declaration line
    #[structopt(short = "X", name = "xml-bare")]
    xml_bare: bool,
    /// Input file
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

/// Only `[-x|-X] <file>` is accepted, with the flag first and no `--`.
fn valid_shape(args: &[OsString]) -> bool {
    let rest = match args.get(1..) {
        Some(rest) => rest,
        None => return false,
    };
    if rest.iter().any(|a| a == "--") {
        return false;
    }
    match rest {
        [_] => true,
        [flag, _] => flag == "-x" || flag == "-X",
        _ => false,
    }
}

impl Opt {
    fn mode(&self) -> Mode {
        if self.xml {
            Mode::Xml { declaration: true }
        } else if self.xml_bare {
            Mode::Xml { declaration: false }
        } else {
            Mode::PlainText
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error("{}", USAGE)]
    Usage(#[source] Option<structopt::clap::Error>),
    #[error("Unable to open file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to read header")]
    ReadHeader(#[source] CineonError),
    #[error("Unable to write output")]
    Output(#[source] io::Error),
}

fn run<I>(args: I) -> Result<(), RunError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if !valid_shape(&args) {
        return Err(RunError::Usage(None));
    }
    let opt = Opt::from_iter_safe(args).map_err(|e| RunError::Usage(Some(e)))?;
    debug!("{:?}", opt);

    let file = File::open(&opt.input).map_err(|source| RunError::Open {
        path: opt.input.clone(),
        source,
    })?;
    let header = Cineon::default()
        .read_header(BufReader::new(file))
        .map_err(RunError::ReadHeader)?;

    let stdout = io::stdout();
    let lock = render_header(&header, opt.mode(), stdout.lock()).map_err(RunError::Output)?;
    drop(lock);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(std::env::args_os()) {
        if let Some(source) = std::error::Error::source(&e) {
            debug!("{}", source);
        }
        println!("{}", e);
        process::exit(1);
    }
}
