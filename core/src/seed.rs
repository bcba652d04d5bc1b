use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Random bytes drawn for an auto-generated seed, rendered as twice as many hex digits.
pub const GENERATED_SEED_BYTES: usize = 32;

/// Longest seed accepted as typed; anything longer is replaced by a generated one.
pub const MAX_SEED_LEN: usize = 256;

/// Seed string that fixes a mine layout together with a mine count.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

/// Where a resolved seed came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedOrigin {
    /// The input was used as typed (after trimming).
    Provided,
    /// The input was empty, a fresh seed was generated.
    Generated,
    /// The input was malformed, a fresh seed was generated in its place.
    Replaced,
}

impl Seed {
    /// Accepts `input` as a seed if it is usable, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.chars().count() > MAX_SEED_LEN
            || trimmed.chars().any(char::is_control)
        {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Generates a fresh seed of lowercase hex digits.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; GENERATED_SEED_BYTES] = rng.random();
        Self(hex::encode(bytes))
    }

    /// Turns raw configuration input into a seed, generating one when the input is empty
    /// or malformed.
    pub fn resolve<R: Rng + ?Sized>(input: &str, rng: &mut R) -> (Self, SeedOrigin) {
        if let Some(seed) = Self::parse(input) {
            return (seed, SeedOrigin::Provided);
        }

        if input.trim().is_empty() {
            log::debug!("empty seed, generating one");
            (Self::generate(rng), SeedOrigin::Generated)
        } else {
            log::warn!(
                "malformed seed ({} chars), falling back to a generated seed",
                input.chars().count()
            );
            (Self::generate(rng), SeedOrigin::Replaced)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 digest of the seed text; the root of every layout derived from it.
    pub fn digest(&self) -> [u8; 32] {
        digest_str(&self.0)
    }

    pub fn info(&self) -> SeedInfo {
        SeedInfo::analyze(&self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Surrounding whitespace is not part of a seed, so raw input hashes like its parsed form.
pub(crate) fn digest_str(seed: &str) -> [u8; 32] {
    Sha256::digest(seed.trim().as_bytes()).into()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedFormat {
    Sha256,
    Sha1,
    Md5,
    Base64,
    Custom,
}

impl SeedFormat {
    pub fn detect(seed: &str) -> Self {
        let is_hex = !seed.is_empty() && seed.chars().all(|c| c.is_ascii_hexdigit());
        match seed.len() {
            64 if is_hex => Self::Sha256,
            40 if is_hex => Self::Sha1,
            32 if is_hex => Self::Md5,
            _ if !seed.is_empty()
                && seed
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')) =>
            {
                Self::Base64
            }
            _ => Self::Custom,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha1 => "SHA-1",
            Self::Md5 => "MD5",
            Self::Base64 => "Base64",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntropyRating {
    Low,
    Medium,
    High,
}

/// Quick quality report for a seed string.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedInfo {
    pub format: SeedFormat,
    /// Shannon entropy of the character distribution, in bits per character.
    pub entropy: f64,
    pub rating: EntropyRating,
}

impl SeedInfo {
    pub fn analyze(seed: &str) -> Self {
        let entropy = shannon_entropy(seed);
        let rating = if entropy > 3.0 {
            EntropyRating::High
        } else if entropy > 2.0 {
            EntropyRating::Medium
        } else {
            EntropyRating::Low
        };
        Self {
            format: SeedFormat::detect(seed),
            entropy,
            rating,
        }
    }
}

fn shannon_entropy(text: &str) -> f64 {
    use std::collections::BTreeMap;

    let mut frequencies: BTreeMap<char, usize> = BTreeMap::new();
    let mut length = 0usize;
    for c in text.chars() {
        *frequencies.entry(c).or_default() += 1;
        length += 1;
    }
    if length == 0 {
        return 0.0;
    }

    frequencies
        .values()
        .map(|&count| {
            let p = count as f64 / length as f64;
            -p * p.log2()
        })
        .sum()
}
