use std::fmt::Write;

use clap::Args;
use num_traits::ToPrimitive;
use pubkey::DecodedKey;
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{FingerprintAlgorithm, calculate_fingerprint, format_hex_dump, load_key};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the public key file (e.g. id_rsa.pub). If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Output format (text, json, yaml, brief)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,

    /// Show fingerprint only
    #[arg(long)]
    pub(crate) show_fingerprint: bool,

    /// Fingerprint algorithm (SHA256, SHA512)
    #[arg(long, value_enum, default_value = "sha256")]
    pub(crate) fingerprint_alg: FingerprintAlgorithm,

    /// Show key size only
    #[arg(long)]
    pub(crate) show_key_size: bool,

    /// Show HEX dump of the wire blob
    #[arg(long)]
    pub(crate) hex: bool,

    /// Largest field accepted in the wire blob, in bytes
    #[arg(long)]
    pub(crate) max_field_length: Option<usize>,
}

#[derive(Serialize)]
struct KeyInfo<'a> {
    #[serde(flatten)]
    key: &'a DecodedKey,
    modulus_bits: u64,
    comment: Option<&'a str>,
    fingerprint: String,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let loaded = load_key(config.file.as_deref(), config.max_field_length)?;
    let fingerprint = calculate_fingerprint(&loaded.blob, config.fingerprint_alg);

    if config.hex {
        print!("{}", format_hex_dump(&loaded.blob));
        return Ok(());
    }

    if config.show_fingerprint {
        println!("{}", fingerprint);
        return Ok(());
    }

    if config.show_key_size {
        println!("RSA {} bits", loaded.key.modulus_bits());
        return Ok(());
    }

    let info = KeyInfo {
        key: &loaded.key,
        modulus_bits: loaded.key.modulus_bits(),
        comment: loaded.envelope.comment(),
        fingerprint,
    };

    match config.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&info)?);
        }
        OutputFormat::Text => {
            print!("{}", format_text(&info)?);
        }
        OutputFormat::Brief => {
            // same shape as `ssh-keygen -l`
            println!(
                "{} {} {} (RSA)",
                info.modulus_bits,
                info.fingerprint,
                info.comment.unwrap_or("no comment")
            );
        }
    }

    Ok(())
}

fn format_text(info: &KeyInfo<'_>) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "SSH RSA Public Key")?;
    writeln!(output, "Key Type: {}", info.key.key_type)?;
    if let Some(comment) = info.comment {
        writeln!(output, "Comment: {}", comment)?;
    }
    writeln!(output, "Modulus (n): {} bits", info.modulus_bits)?;
    writeln!(
        output,
        "Public Exponent (e): {}",
        info.key
            .exponent
            .to_u64()
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("{} bits", info.key.exponent.bits()))
    )?;
    writeln!(output, "Fingerprint: {}", info.fingerprint)?;

    Ok(output)
}
