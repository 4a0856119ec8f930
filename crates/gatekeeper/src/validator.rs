use crate::config::Config;

/// Every toy production key ends with this token, e.g. `TeddyBear123!`.
pub const KEY_SUFFIX: &str = "123!";

/// Checks toy production keys against the toy allow-list and secrets
/// against the single accepted literal.
#[derive(Debug, Clone)]
pub struct Validator {
    toy_names: Vec<String>,
    secret: String,
}

impl Validator {
    pub fn new(toy_names: Vec<String>, secret: impl Into<String>) -> Self {
        Self {
            toy_names,
            secret: secret.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.toy_names.clone(), config.gatekeeper_secret.clone())
    }

    /// A key is `<toy name>123!` where the toy name, after upper-casing its
    /// first character, is on the allow-list. The suffix must occur exactly once.
    pub fn validate_key_format(&self, value: &str) -> bool {
        self.toy_name(value).is_some()
    }

    /// The allow-listed toy name a valid key stands for, `None` otherwise.
    pub fn toy_name<'a>(&'a self, value: &str) -> Option<&'a str> {
        let mut parts = value.split(KEY_SUFFIX);
        let (Some(toy), Some(""), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        if toy.is_empty() {
            return None;
        }

        let toy = capitalize(toy);
        self.toy_names
            .iter()
            .find(|name| **name == toy)
            .map(String::as_str)
    }

    pub fn validate_secret(&self, value: &str) -> bool {
        value == self.secret
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
