#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// One line summary
    Brief,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum Encoding {
    /// PEM armor
    Pem,
    /// Unwrapped base64
    Base64,
    /// Hex dump
    Hex,
}
