use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cryptkit::config::{APP_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_PASSWORD_LENGTH, FILE_EXTENSION, MIN_ENCRYPTION_SCORE, PASSWORD_MIN_LENGTH};
use cryptkit::validation::validate_file_name;
use cryptkit::{
    Algorithm, HashAlgorithm, Integrity, KeyLength, PasswordOptions, Processing, Secret, Source, decrypt_data, decrypt_text, digest_hex, encrypt_large_file, encrypt_text,
    evaluate_password_strength, generate_key, generate_password,
};
use tracing_subscriber::EnvFilter;

use crate::ui::display;
use crate::ui::progress::Bar;
use crate::ui::prompt::Prompt;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file into a `.encrypted` container.
    Encrypt {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(short, long, default_value_t = Algorithm::AesGcm)]
        algorithm: Algorithm,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        #[arg(short, long)]
        force: bool,
    },

    /// Decrypt a container and restore the original file.
    Decrypt {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        password: Option<String>,

        /// Fail instead of warning when the integrity check does not match.
        #[arg(long)]
        strict: bool,

        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt text into a base64 string.
    EncryptText {
        text: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Decrypt a base64 string produced by `encrypt-text`.
    DecryptText {
        text: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Generate a random password.
    Password {
        #[arg(short, long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
        length: usize,

        #[arg(long)]
        no_uppercase: bool,

        #[arg(long)]
        no_lowercase: bool,

        #[arg(long)]
        no_numbers: bool,

        #[arg(long)]
        no_symbols: bool,
    },

    /// Score a password.
    Strength { password: Option<String> },

    /// Generate a random key as hex.
    Key {
        #[arg(short, long, default_value_t = KeyLength::Bits256)]
        bits: KeyLength,
    },

    /// Hash a file or a string.
    Hash {
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        #[arg(short, long)]
        text: Option<String>,

        #[arg(short, long, default_value_t = HashAlgorithm::Sha256)]
        algorithm: HashAlgorithm,
    },
}

#[derive(Parser)]
#[command(name = APP_NAME, version = "26.1.0", about = "Password-based file and text encryption with AES-256-GCM and ChaCha20-Poly1305.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    pub async fn execute(self) -> Result<()> {
        let prompt = Prompt::new(PASSWORD_MIN_LENGTH);
        match self.command {
            Commands::Encrypt { input, output, password, algorithm, chunk_size, force } => {
                let password = Self::encryption_password(password, &prompt)?;
                Self::encrypt_file(&input, output, &password, algorithm, chunk_size, force).await
            }
            Commands::Decrypt { input, output, password, strict, force } => {
                let password = Self::decryption_password(password, &prompt)?;
                Self::decrypt_file(&input, output, &password, strict, force).await
            }
            Commands::EncryptText { text, password } => {
                let password = Self::encryption_password(password, &prompt)?;
                println!("{}", encrypt_text(&text, &password).await.context("text encryption failed")?);
                Ok(())
            }
            Commands::DecryptText { text, password } => {
                let password = Self::decryption_password(password, &prompt)?;
                println!("{}", decrypt_text(&text, &password).await.context("text decryption failed")?);
                Ok(())
            }
            Commands::Password { length, no_uppercase, no_lowercase, no_numbers, no_symbols } => {
                let options = PasswordOptions { uppercase: !no_uppercase, lowercase: !no_lowercase, numbers: !no_numbers, symbols: !no_symbols };
                println!("{}", generate_password(length, options)?);
                Ok(())
            }
            Commands::Strength { password } => {
                let password = match password {
                    Some(password) => Secret::from_string(password),
                    None => Prompt::prompt_password_to_check()?,
                };
                display::show_strength(&evaluate_password_strength(password.expose_secret()));
                Ok(())
            }
            Commands::Key { bits } => {
                println!("{}", generate_key(bits)?);
                Ok(())
            }
            Commands::Hash { input, text, algorithm } => {
                let data = match (input, text) {
                    (Some(path), _) => tokio::fs::read(&path).await.with_context(|| format!("failed to read {}", path.display()))?,
                    (None, Some(text)) => text.into_bytes(),
                    (None, None) => bail!("either --input or --text is required"),
                };
                println!("{}", digest_hex(&data, algorithm));
                Ok(())
            }
        }
    }

    async fn encrypt_file(input: &Path, output: Option<PathBuf>, password: &Secret, algorithm: Algorithm, chunk_size: usize, force: bool) -> Result<()> {
        validate_file_name(input)?;

        let output = output.unwrap_or_else(|| encrypted_path(input));
        Self::check_overwrite(&output, force).await?;

        let source = Source::open(input).await.with_context(|| format!("failed to open {}", input.display()))?;
        let bar = Bar::new(source.size(), Processing::Encryption);
        let container = encrypt_large_file(source, password, algorithm, chunk_size, &bar)
            .await
            .with_context(|| format!("{} failed: {}", Processing::Encryption, input.display()))?;
        drop(bar);

        tokio::fs::write(&output, container).await.with_context(|| format!("failed to write {}", output.display()))?;
        display::show_success(Processing::Encryption, &output);
        Ok(())
    }

    async fn decrypt_file(input: &Path, output: Option<PathBuf>, password: &Secret, strict: bool, force: bool) -> Result<()> {
        let container = tokio::fs::read(input).await.with_context(|| format!("failed to read {}", input.display()))?;

        let bar = Bar::new(container.len() as u64, Processing::Decryption);
        let decrypted = decrypt_data(&container, password, &bar)
            .await
            .with_context(|| format!("{} failed: {}", Processing::Decryption, input.display()))?;
        drop(bar);

        display::show_metadata(&decrypted.metadata, decrypted.integrity);
        if decrypted.integrity == Integrity::Mismatch {
            display::show_integrity_warning();
            if strict {
                decrypted.ensure_intact()?;
            }
        }

        let output = output.unwrap_or_else(|| restored_path(input, &decrypted.metadata.original_name));
        Self::check_overwrite(&output, force).await?;

        tokio::fs::write(&output, &decrypted.data).await.with_context(|| format!("failed to write {}", output.display()))?;
        display::show_success(Processing::Decryption, &output);
        Ok(())
    }

    /// Encryption passwords must clear the minimum strength score.
    fn encryption_password(password: Option<String>, prompt: &Prompt) -> Result<Secret> {
        let password = match password {
            Some(password) => Secret::from_string(password),
            None => prompt.prompt_encryption_password()?,
        };

        let report = evaluate_password_strength(password.expose_secret());
        if report.score < MIN_ENCRYPTION_SCORE {
            display::show_strength(&report);
            bail!("password is too weak ({} < {MIN_ENCRYPTION_SCORE}), choose a stronger one", report.score);
        }
        Ok(password)
    }

    fn decryption_password(password: Option<String>, prompt: &Prompt) -> Result<Secret> {
        match password {
            Some(password) => Ok(Secret::from_string(password)),
            None => prompt.prompt_decryption_password(),
        }
    }

    async fn check_overwrite(output: &Path, force: bool) -> Result<()> {
        if !force && tokio::fs::try_exists(output).await.unwrap_or(false) && !Prompt::confirm_file_overwrite(output)? {
            bail!("operation canceled");
        }
        Ok(())
    }
}

fn encrypted_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(FILE_EXTENSION);
    PathBuf::from(name)
}

/// Next to the container, under the name recorded in its metadata.
/// Only the final component of the recorded name is used.
fn restored_path(input: &Path, original_name: &str) -> PathBuf {
    let directory = input.parent().unwrap_or_else(|| Path::new(""));
    match Path::new(original_name).file_name() {
        Some(name) => directory.join(name),
        None => input.with_extension(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypted_path() {
        assert_eq!(encrypted_path(Path::new("dir/report.pdf")), PathBuf::from("dir/report.pdf.encrypted"));
    }

    #[test]
    fn test_restored_path() {
        let input = Path::new("dir/report.pdf.encrypted");
        assert_eq!(restored_path(input, "report.pdf"), PathBuf::from("dir/report.pdf"));
        assert_eq!(restored_path(input, "../../etc/passwd"), PathBuf::from("dir/passwd"));
        assert_eq!(restored_path(input, ".."), PathBuf::from("dir/report.pdf"));
    }

    #[test]
    fn test_cli_parses() {
        let app = App::try_parse_from(["cryptkit", "encrypt", "-i", "a.txt", "-a", "chacha20-poly1305"]).unwrap();
        assert!(matches!(app.command, Commands::Encrypt { algorithm: Algorithm::ChaCha20Poly1305, chunk_size: DEFAULT_CHUNK_SIZE, .. }));

        let app = App::try_parse_from(["cryptkit", "key", "--bits", "512"]).unwrap();
        assert!(matches!(app.command, Commands::Key { bits: KeyLength::Bits512 }));

        let app = App::try_parse_from(["cryptkit", "hash", "-t", "abc", "-a", "sha512"]).unwrap();
        assert!(matches!(app.command, Commands::Hash { algorithm: HashAlgorithm::Sha512, .. }));

        assert!(App::try_parse_from(["cryptkit", "hash", "-i", "a", "-t", "b"]).is_err());
        assert!(App::try_parse_from(["cryptkit", "encrypt", "-i", "a.txt", "-a", "des"]).is_err());
    }
}
