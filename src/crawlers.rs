// src/crawlers.rs
use std::fmt;
use std::fs;

/// User-Agent fragments of link-preview fetchers and search crawlers.
const BUILTIN_SIGNATURES: &[&str] = &[
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "telegrambot",
    "slackbot",
    "discordbot",
    "googlebot",
    "bingbot",
    "applebot",
    "embedly",
    "vkshare",
    "ia_archiver",
    "rogerbot",
    "showyoubot",
    "bufferbot",
    "pinterest",
    "outbrain",
];

#[derive(Debug)]
pub enum SignatureError {
    Io(String),
    Empty,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::Io(msg) => write!(f, "failed to read signature file: {msg}"),
            SignatureError::Empty => write!(f, "signature list is empty"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// Case-insensitive allow-list of crawler User-Agent fragments.
#[derive(Debug, Clone)]
pub struct CrawlerSignatures {
    fragments: Vec<String>,
}

impl CrawlerSignatures {
    pub fn builtin() -> Self {
        Self {
            fragments: BUILTIN_SIGNATURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// One fragment per line; blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, SignatureError> {
        let mut fragments: Vec<String> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fragment = line.to_lowercase();
            if !fragments.contains(&fragment) {
                fragments.push(fragment);
            }
        }

        if fragments.is_empty() {
            return Err(SignatureError::Empty);
        }
        Ok(Self { fragments })
    }

    pub fn from_file(path: &str) -> Result<Self, SignatureError> {
        let text = fs::read_to_string(path).map_err(|e| SignatureError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    /// The first fragment contained in `user_agent`, if any.
    pub fn matching(&self, user_agent: &str) -> Option<&str> {
        if user_agent.is_empty() {
            return None;
        }
        let lower = user_agent.to_lowercase();
        self.fragments
            .iter()
            .find(|f| lower.contains(f.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}
