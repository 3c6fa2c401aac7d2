use clap::*;
use log::{error, info};
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The source file to transpile.
    #[clap(value_parser)]
    input: PathBuf,

    /// The file to write the generated assembly to.
    #[clap(value_parser)]
    output: PathBuf,
}

enum Error {
    Open(PathBuf, std::io::Error),
    Create(PathBuf, std::io::Error),
    Transpile(stasm::Error),
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open(path, e) => write!(f, "could not open {}: {e}", path.display()),
            Error::Create(path, e) => write!(f, "could not create {}: {e}", path.display()),
            Error::Transpile(e) => write!(f, "{e}"),
        }
    }
}

fn run(args: &Args) -> Result<usize, Error> {
    let input = File::open(&args.input).map_err(|e| Error::Open(args.input.clone(), e))?;
    let output = File::create(&args.output).map_err(|e| Error::Create(args.output.clone(), e))?;

    info!("Transpiling {} to {}", args.input.display(), args.output.display());
    stasm::transpile(BufReader::new(input), BufWriter::new(output)).map_err(Error::Transpile)
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(lines) => {
            info!("Finished: {lines} lines written to {}", args.output.display());
            Ok(())
        }
        Err(e) => {
            error!("Failed to transpile {}: {e:?}", args.input.display());
            Err(e)
        }
    }
}
