use std::collections::HashMap;
use std::path::Path;

const ENGLISH: &[(&str, &str)] = &[
    ("Post.Favourite", "Favourite"),
    ("Post.Favourited", "Favourited"),
    ("Post.Votes", "votes"),
    ("Post.Favourites", "favourites"),
    ("Errors.Generic", "Sorry, something went wrong. Please try again."),
    (
        "Errors.GenericMessage",
        "There was a problem processing your request. Please try again later.",
    ),
    ("Errors.NotFound", "Sorry, we could not find what you were looking for."),
    ("Errors.Unauthorised", "Please log on to do that."),
    ("Poll.InvalidAnswer", "That answer does not belong to this poll."),
    ("Poll.TotalVotes", "Total votes"),
    ("Poll.Voted", "You have voted in this poll"),
    ("Favourites.Title", "My Favourites"),
    ("Favourites.Empty", "You have not favourited any posts yet."),
];

#[derive(Debug, thiserror::Error)]
pub enum LocalizationError {
    #[error("failed to read locale file: {0}")]
    Io(#[from] std::io::Error),

    #[error("locale file is not a JSON object of strings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Resource string lookup by key.
#[derive(Debug, Clone)]
pub struct Localizer {
    strings: HashMap<String, String>,
}

impl Localizer {
    pub fn english() -> Self {
        Self {
            strings: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Built-in strings overridden by the entries of a JSON object file.
    pub fn from_file(path: &Path) -> Result<Self, LocalizationError> {
        let raw = std::fs::read_to_string(path)?;
        let mut localizer = Self::english();
        localizer.merge_json(&raw)?;
        Ok(localizer)
    }

    pub fn merge_json(&mut self, raw: &str) -> Result<(), LocalizationError> {
        let overrides: HashMap<String, String> = serde_json::from_str(raw)?;
        self.strings.extend(overrides);
        Ok(())
    }

    /// Falls back to the key itself when no string is registered.
    pub fn get(&self, key: &str) -> String {
        match self.strings.get(key) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!("Missing resource string for key {}", key);
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_key() {
        let localizer = Localizer::english();
        assert_eq!(localizer.get("Nope.Missing"), "Nope.Missing");
        assert_eq!(localizer.get("Post.Favourited"), "Favourited");
    }

    #[test]
    fn overrides_replace_builtin_strings() {
        let mut localizer = Localizer::english();
        localizer
            .merge_json(r#"{"Post.Favourited": "Favorito", "Extra.Key": "x"}"#)
            .expect("valid json");
        assert_eq!(localizer.get("Post.Favourited"), "Favorito");
        assert_eq!(localizer.get("Post.Favourite"), "Favourite");
        assert_eq!(localizer.get("Extra.Key"), "x");
    }

    #[test]
    fn rejects_non_string_values() {
        let mut localizer = Localizer::english();
        assert!(localizer.merge_json(r#"{"Post.Favourited": 3}"#).is_err());
    }
}
