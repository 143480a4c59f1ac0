//! Command-line front end over the `crx3` library: pack, unpack, zip,
//! unzip, keygen, base64, id, pubkey, download.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};

use crx3::keys;

#[derive(Parser)]
#[command(name = "crx3", about = "Read, write, and inspect CRX3 extension containers", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack a directory or .zip into a signed CRX3.
    Pack {
        source: PathBuf,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
        #[arg(short = 'p', long = "pem")]
        pem: Option<PathBuf>,
    },
    /// Unpack a CRX3 into a directory.
    Unpack {
        source: PathBuf,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
    },
    /// Zip a directory.
    Zip {
        source: PathBuf,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
    },
    /// Unzip a .zip file into a directory.
    Unzip {
        source: PathBuf,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
    },
    /// Generate an RSA key pair and write it as PEM.
    Keygen {
        #[arg(short = 's', long = "size", default_value_t = 2048)]
        size: usize,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
    },
    /// Print a file's contents base64-encoded.
    Base64 { source: PathBuf },
    /// Print the textual extension id for a directory, ZIP, or CRX3.
    Id { source: PathBuf },
    /// Print the public key embedded in a directory, ZIP, or CRX3: a
    /// manifest.json override verbatim, or else the header proof as PEM.
    Pubkey { source: PathBuf },
    /// Download an extension's CRX3 from the web store.
    Download {
        id: String,
        #[arg(short = 'o', long = "outfile")]
        outfile: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run() {
        println!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Pack { source, outfile, pem } => {
            let key = match pem {
                Some(path) => Some(keys::load_key(&std::fs::read(&path).context("reading PEM")?)?),
                None => None,
            };
            let out = crx3::pack(&source, outfile.as_deref(), key)?;
            println!("{}", out.display());
        }
        Command::Unpack { source, outfile } => {
            let dest = outfile.unwrap_or_else(|| default_sibling(&source, ""));
            crx3::unpack(&source, &dest)?;
            println!("{}", dest.display());
        }
        Command::Zip { source, outfile } => {
            let dest = outfile.unwrap_or_else(|| source.with_extension("zip"));
            let bytes = crx3::ziputil::zip_dir(&source)?;
            std::fs::write(&dest, bytes)?;
            println!("{}", dest.display());
        }
        Command::Unzip { source, outfile } => {
            let dest = outfile.unwrap_or_else(|| default_sibling(&source, ""));
            let bytes = std::fs::read(&source)?;
            crx3::ziputil::unzip_to(&bytes, &dest)?;
            println!("{}", dest.display());
        }
        Command::Keygen { size, outfile } => {
            let key = keys::generate_key(Some(size))?;
            let pem_bytes = keys::save_key(&key)?;
            match outfile {
                Some(path) => std::fs::write(&path, &pem_bytes)?,
                None => print!("{}", String::from_utf8_lossy(&pem_bytes)),
            }
        }
        Command::Base64 { source } => {
            let bytes = std::fs::read(&source)?;
            println!("{}", STANDARD.encode(bytes));
        }
        Command::Id { source } => {
            println!("{}", crx3::derive_id(&source)?);
        }
        Command::Pubkey { source } => {
            let bytes = crx3::public_key_for_source(&source)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Download { id, outfile } => {
            let bytes = crx3::download::download_from_web_store(&id)?;
            let dest = outfile.unwrap_or_else(|| PathBuf::from(format!("{id}.crx")));
            std::fs::write(&dest, bytes)?;
            println!("{}", dest.display());
        }
    }
    Ok(())
}

/// Derives `<source-without-extension><suffix>` for operations whose
/// destination defaults to a sibling of the source.
fn default_sibling(source: &Path, suffix: &str) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let mut out = source.with_file_name(stem);
    if !suffix.is_empty() {
        out = PathBuf::from(format!("{}{}", out.display(), suffix));
    }
    out
}
