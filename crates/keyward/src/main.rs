//! Keyward command line
//!
//! Thin wrapper over the [`Keyward`] facade for operators: hash and check
//! passwords, mint and inspect tokens, and produce keys and digests.
//! Configuration comes from the same sources as the library.

use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::{Parser, Subcommand, ValueEnum};
use keyward::infrastructure::ConfigLoader;
use keyward::infrastructure::logging::init_logging;
use keyward::{Keyward, SymmetricAlgorithm, TokenPayload};
use std::path::PathBuf;

/// Command line interface for Keyward
#[derive(Parser, Debug)]
#[command(name = "keyward")]
#[command(about = "Keyward - credential and cryptographic primitives")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a password with bcrypt
    HashPassword {
        /// Password to hash
        password: String,
    },
    /// Check a password against a stored hash
    VerifyPassword {
        /// Candidate password
        password: String,
        /// Stored bcrypt hash
        hash: String,
    },
    /// Print random bytes
    Random {
        /// Number of bytes
        #[arg(short, long, default_value_t = 32)]
        bytes: usize,
        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,
    },
    /// Print the SHA-256 digest of a string
    Sha256 {
        /// Input text
        input: String,
    },
    /// Generate a symmetric key (base64)
    GenerateKey {
        /// Cipher the key is for
        #[arg(short, long, value_enum, default_value_t = Cipher::Aes)]
        algorithm: Cipher,
    },
    /// Issue an access/refresh token pair
    IssueToken {
        /// Subject identifier
        subject: String,
        /// Email claim
        #[arg(long)]
        email: Option<String>,
        /// Role claim
        #[arg(long)]
        role: Option<String>,
    },
    /// Verify a token and print its claims
    VerifyToken {
        /// Compact token
        token: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Encoding {
    Hex,
    Base64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Cipher {
    Aes,
    Chacha20,
}

impl From<Cipher> for SymmetricAlgorithm {
    fn from(cipher: Cipher) -> Self {
        match cipher {
            Cipher::Aes => SymmetricAlgorithm::Aes256Gcm,
            Cipher::Chacha20 => SymmetricAlgorithm::ChaCha20Poly1305,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let keyward = Keyward::from_config(config).context("Failed to build keyward")?;
    run(&keyward, cli.command).await
}

async fn run(keyward: &Keyward, command: Command) -> Result<()> {
    match command {
        Command::HashPassword { password } => {
            let hash = keyward.hash_password(&password).await?;
            println!("{hash}");
        }
        Command::VerifyPassword { password, hash } => {
            if keyward.compare_password(&password, &hash).await? {
                println!("match");
            } else {
                bail!("password does not match");
            }
        }
        Command::Random { bytes, encoding } => {
            let random = keyward.generate_secure_random(bytes)?;
            match encoding {
                Encoding::Hex => println!("{}", hex::encode(random)),
                Encoding::Base64 => println!("{}", STANDARD.encode(random)),
            }
        }
        Command::Sha256 { input } => {
            println!("{}", hex::encode(keyward.hash_sha256(input.as_bytes())));
        }
        Command::GenerateKey { algorithm } => {
            let key = keyward.generate_key(algorithm.into())?;
            println!("{}", STANDARD.encode(key.as_bytes()));
        }
        Command::IssueToken {
            subject,
            email,
            role,
        } => {
            let mut payload = TokenPayload::new(subject);
            payload.email = email;
            payload.role = role;
            let pair = keyward.generate_tokens(&payload)?;
            println!("{}", serde_json::to_string_pretty(&pair)?);
        }
        Command::VerifyToken { token } => {
            let claims = keyward.verify_token(&token)?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }
    Ok(())
}
