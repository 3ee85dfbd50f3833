use base64::{Engine, engine::general_purpose::STANDARD};
use clap::{Args, ValueEnum};
use pem::{Label, Pem, ToPem};
use pubkey::RSAPublicKey;

use crate::error::{Error, Result};
use crate::output::Encoding;
use crate::utils::{format_hex_dump, load_key};

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum KeyFormat {
    /// X.509 SubjectPublicKeyInfo
    Spki,
    /// PKCS#1 RSAPublicKey
    Pkcs1,
    /// OpenSSH wire blob
    Openssh,
}

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the public key file (e.g. id_rsa.pub). If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Key structure to write
    #[arg(short, long, value_enum, default_value = "spki")]
    pub(crate) format: KeyFormat,

    /// How the encoded key is written. Defaults to PEM for spki and pkcs1,
    /// and to the single-line `.pub` form for openssh
    #[arg(short, long, value_enum)]
    pub(crate) encoding: Option<Encoding>,

    /// Largest field accepted in the wire blob, in bytes
    #[arg(long)]
    pub(crate) max_field_length: Option<usize>,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let loaded = load_key(config.file.as_deref(), config.max_field_length)?;

    let (label, der) = match config.format {
        KeyFormat::Openssh => {
            let output = match config.encoding {
                None => loaded.key.to_openssh(loaded.envelope.comment())?,
                Some(Encoding::Pem) => {
                    return Err(Error::InvalidInput(
                        "openssh keys have no PEM form; omit --encoding for the .pub line"
                            .to_string(),
                    ));
                }
                Some(Encoding::Base64) => format!("{}\n", STANDARD.encode(loaded.key.to_blob()?)),
                Some(Encoding::Hex) => format_hex_dump(&loaded.key.to_blob()?),
            };
            print!("{}", output);
            return Ok(());
        }
        KeyFormat::Spki => {
            let rsa = RSAPublicKey::try_from(&loaded.key)?;
            (rsa.pem_label(), rsa.to_spki_der())
        }
        KeyFormat::Pkcs1 => {
            let rsa = RSAPublicKey::try_from(&loaded.key)?;
            (Label::RSAPublicKey, rsa.to_pkcs1_der())
        }
    };

    match config.encoding.unwrap_or(Encoding::Pem) {
        Encoding::Pem => print!("{}", Pem::from_bytes(label, &der)),
        Encoding::Base64 => println!("{}", STANDARD.encode(&der)),
        Encoding::Hex => print!("{}", format_hex_dump(&der)),
    }

    Ok(())
}
