//! Server-side HTML for the three pages.

use axum::http::StatusCode;
use std::fmt::Write;

use crate::forms::{FormErrors, VideoForm};
use crate::videos::Video;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
}

impl Level {
    fn css_class(self) -> &'static str {
        match self {
            Level::Warning => "warning",
        }
    }
}

/// A notice shown once on the page rendered for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            text: text.into(),
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, messages: &[Message], content: &str) -> String {
    let mut notices = String::new();
    if !messages.is_empty() {
        notices.push_str("<ul class=\"messages\">");
        for message in messages {
            let _ = write!(
                notices,
                "<li class=\"{}\">{}</li>",
                message.level.css_class(),
                escape(&message.text)
            );
        }
        notices.push_str("</ul>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/add\">Add Video</a> | <a href=\"/video_list\">Video List</a></nav>\n\
         {notices}\n<main>\n{content}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        notices = notices,
        content = content,
    )
}

pub fn home_page(app_name: &str) -> String {
    let content = format!(
        "<h1>{}</h1>\n<p>Save the YouTube videos you want to come back to.</p>\n\
         <p><a href=\"/add\">Add a video</a> or <a href=\"/video_list\">browse your collection</a>.</p>",
        escape(app_name)
    );
    layout(app_name, &[], &content)
}

fn field_errors(errors: &FormErrors, field: &str) -> String {
    errors
        .field(field)
        .iter()
        .map(|e| format!("<span class=\"error\">{}</span>", escape(e)))
        .collect()
}

pub fn add_page(form: &VideoForm, errors: &FormErrors, messages: &[Message]) -> String {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());

    let content = format!(
        "<h2>Add Video</h2>\n\
         <form method=\"post\" action=\"/add\">\n\
         <p><label for=\"name\">Name</label> <input id=\"name\" name=\"name\" maxlength=\"200\" required value=\"{name}\">{name_errors}</p>\n\
         <p><label for=\"url\">Url</label> <input id=\"url\" name=\"url\" maxlength=\"400\" required value=\"{url}\">{url_errors}</p>\n\
         <p><label for=\"notes\">Notes</label> <textarea id=\"notes\" name=\"notes\">{notes}</textarea>{notes_errors}</p>\n\
         <button type=\"submit\">Add</button>\n\
         </form>",
        name = value(&form.name),
        name_errors = field_errors(errors, "name"),
        url = value(&form.url),
        url_errors = field_errors(errors, "url"),
        notes = value(&form.notes),
        notes_errors = field_errors(errors, "notes"),
    );
    layout("Add Video", messages, &content)
}

pub fn video_count(count: usize) -> String {
    if count == 1 {
        "1 Video".to_string()
    } else {
        format!("{} Videos", count)
    }
}

pub fn video_list_page(videos: &[Video], search_term: Option<&str>) -> String {
    let mut content = format!(
        "<h2>Video List</h2>\n\
         <form method=\"get\" action=\"/video_list\">\n\
         <input name=\"search_term\" placeholder=\"Search by name\" value=\"{}\">\n\
         <button type=\"submit\">Search</button> <a href=\"/video_list\">Clear</a>\n\
         </form>\n<h3>{}</h3>\n",
        escape(search_term.unwrap_or_default()),
        video_count(videos.len()),
    );

    if videos.is_empty() {
        content.push_str("<p>No Videos Found!</p>");
    }

    for video in videos {
        let notes = video
            .notes
            .as_deref()
            .map(|n| format!("<p class=\"notes\">{}</p>", escape(n)))
            .unwrap_or_default();

        let _ = write!(
            content,
            "<article class=\"video\">\n<h4>{name}</h4>\n<p><a href=\"{url}\">{url}</a></p>\n{notes}\n\
             <iframe width=\"420\" height=\"315\" src=\"{embed}\" title=\"{name}\" allowfullscreen></iframe>\n</article>\n",
            name = escape(&video.name),
            url = escape(&video.url),
            notes = notes,
            embed = escape(&video.embed_url()),
        );
    }

    layout("Video List", &[], &content)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        "<h2>{}</h2>\n<p>{}</p>",
        status,
        escape(message)
    );
    layout("Error", &[], &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: i64, name: &str, notes: Option<&str>) -> Video {
        Video {
            id,
            name: name.to_string(),
            url: format!("https://www.youtube.com/watch?v={}", id),
            notes: notes.map(String::from),
            video_id: id.to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn counts_are_pluralised() {
        assert_eq!(video_count(0), "0 Videos");
        assert_eq!(video_count(1), "1 Video");
        assert_eq!(video_count(2), "2 Videos");
    }

    #[test]
    fn empty_list_says_so() {
        let page = video_list_page(&[], Some("HELLO"));

        assert!(page.contains("0 Videos"));
        assert!(page.contains("No Videos Found!"));
        assert!(page.contains("value=\"HELLO\""));
    }

    #[test]
    fn list_renders_each_video() {
        let page = video_list_page(
            &[video(1, "<b>abc</b>", Some("example")), video(2, "lmn", None)],
            None,
        );

        assert!(page.contains("2 Videos"));
        assert!(!page.contains("No Videos Found!"));
        assert!(page.contains("&lt;b&gt;abc&lt;/b&gt;"));
        assert!(page.contains("https://www.youtube.com/embed/1"));
        assert!(page.contains("https://www.youtube.com/watch?v=2"));
        assert!(page.contains("example"));
    }

    #[test]
    fn add_page_keeps_input_and_shows_messages() {
        let form = VideoForm {
            name: Some("abc".to_string()),
            url: Some("https://github.com".to_string()),
            notes: None,
        };
        let page = add_page(
            &form,
            &FormErrors::default(),
            &[Message::warning("Invalid Youtube URL")],
        );

        assert!(page.contains("value=\"abc\""));
        assert!(page.contains("value=\"https://github.com\""));
        assert!(page.contains("<li class=\"warning\">Invalid Youtube URL</li>"));
    }

    #[test]
    fn home_page_shows_app_name() {
        assert!(home_page("The Weeknd's mind").contains("The Weeknd&#x27;s mind"));
    }
}
