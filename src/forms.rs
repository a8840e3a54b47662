use std::collections::HashMap;

use crate::videos::{NewVideo, MAX_NAME_LENGTH, MAX_URL_LENGTH};

const REQUIRED: &str = "This field is required.";

/// Raw body of the add-video form. Every field is optional here so that a
/// missing field becomes a form error instead of a rejected request.
///
/// Built from the decoded key/value pairs; when a key repeats, the last
/// occurrence wins.
#[derive(Debug, Default, Clone)]
pub struct VideoForm {
    pub name: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl FromIterator<(String, String)> for VideoForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = Some(value),
                "url" => form.url = Some(value),
                "notes" => form.notes = Some(value),
                _ => {}
            }
        }
        form
    }
}

#[derive(thiserror::Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Form validation failed")]
pub struct FormErrors(HashMap<String, Vec<String>>);

impl FormErrors {
    fn add(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl VideoForm {
    pub fn validate(&self) -> Result<NewVideo, FormErrors> {
        let mut errors = FormErrors::default();

        let name = required(&mut errors, "name", self.name.as_deref(), MAX_NAME_LENGTH);
        let url = required(&mut errors, "url", self.url.as_deref(), MAX_URL_LENGTH);
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        match (name, url) {
            (Some(name), Some(url)) if errors.is_empty() => Ok(NewVideo { name, url, notes }),
            _ => Err(errors),
        }
    }
}

fn required(errors: &mut FormErrors, field: &str, value: Option<&str>, max_length: usize) -> Option<String> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        errors.add(field, REQUIRED.to_string());
        return None;
    }

    let length = value.chars().count();
    if length > max_length {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max_length, length
            ),
        );
        return None;
    }

    Some(value.to_string())
}

/// Query string of the listing page. A repeated `search_term` keeps the last
/// value.
#[derive(Debug, Default, Clone)]
pub struct SearchForm {
    pub search_term: Option<String>,
}

impl FromIterator<(String, String)> for SearchForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        Self {
            search_term: pairs
                .into_iter()
                .filter(|(key, _)| key == "search_term")
                .map(|(_, value)| value)
                .last(),
        }
    }
}

impl SearchForm {
    /// The trimmed term, or `None` when the box was left empty.
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: Option<&str>, url: Option<&str>, notes: Option<&str>) -> VideoForm {
        VideoForm {
            name: name.map(String::from),
            url: url.map(String::from),
            notes: notes.map(String::from),
        }
    }

    #[test]
    fn valid_form_trims_fields() {
        let video = form(
            Some("  abc "),
            Some(" https://www.youtube.com/watch?v=123 "),
            Some(" some notes "),
        )
        .validate()
        .unwrap();

        assert_eq!(video.name, "abc");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=123");
        assert_eq!(video.notes.as_deref(), Some("some notes"));
    }

    #[test]
    fn blank_notes_become_none() {
        let video = form(Some("abc"), Some("https://www.youtube.com/watch?v=123"), Some("   "))
            .validate()
            .unwrap();
        assert_eq!(video.notes, None);

        let video = form(Some("abc"), Some("https://www.youtube.com/watch?v=123"), None)
            .validate()
            .unwrap();
        assert_eq!(video.notes, None);
    }

    #[test]
    fn missing_fields_are_reported_per_field() {
        let errors = form(None, Some("  "), None).validate().unwrap_err();

        assert_eq!(errors.field("name"), [REQUIRED.to_string()]);
        assert_eq!(errors.field("url"), [REQUIRED.to_string()]);
        assert!(errors.field("notes").is_empty());
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long_name = "a".repeat(201);
        let long_url = format!("https://www.youtube.com/watch?v={}", "b".repeat(400));

        let errors = form(Some(&long_name), Some(&long_url), None)
            .validate()
            .unwrap_err();

        assert_eq!(
            errors.field("name"),
            ["Ensure this value has at most 200 characters (it has 201).".to_string()]
        );
        assert_eq!(errors.field("url").len(), 1);
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let name = "é".repeat(200);
        assert!(form(Some(&name), Some("https://www.youtube.com/watch?v=1"), None)
            .validate()
            .is_ok());
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn form_takes_last_value_of_repeated_keys() {
        let form: VideoForm = pairs(&[
            ("name", "first"),
            ("url", "https://www.youtube.com/watch?v=1"),
            ("name", "second"),
            ("extra", "ignored"),
        ])
        .into_iter()
        .collect();

        assert_eq!(form.name.as_deref(), Some("second"));
        assert_eq!(form.url.as_deref(), Some("https://www.youtube.com/watch?v=1"));
        assert_eq!(form.notes, None);
    }

    #[test]
    fn search_takes_last_term() {
        let search: SearchForm = pairs(&[("search_term", "a"), ("page", "2"), ("search_term", "b")])
            .into_iter()
            .collect();
        assert_eq!(search.term(), Some("b"));

        let search: SearchForm = pairs(&[("page", "2")]).into_iter().collect();
        assert_eq!(search.term(), None);
    }

    #[test]
    fn search_term_ignores_blank_input() {
        let search = |term: Option<&str>| SearchForm {
            search_term: term.map(String::from),
        };

        assert_eq!(search(None).term(), None);
        assert_eq!(search(Some("")).term(), None);
        assert_eq!(search(Some("   ")).term(), None);
        assert_eq!(search(Some(" ABC ")).term(), Some("ABC"));
    }
}
