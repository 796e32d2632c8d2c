//! src/views
//!
//! HTML rendering for the form and the submissions table.

use std::collections::HashMap;
use std::path::Path;

use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::domain::Submission;

/// Marker replaced by the table rows when a template is rendered with data.
pub const ROWS_PLACEHOLDER: &str = "{{rows}}";

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template: {0:?} is undefined")]
    UnknownTemplate(String),
}

// A failed render answers with 404 and the error text. Existing clients
// depend on that status, so it stays.
impl ResponseError for RenderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

pub trait ViewRenderer: Send + Sync {
    fn render(
        &self,
        template: &str,
        submissions: Option<&[Submission]>,
    ) -> Result<String, RenderError>;
}

/// Templates read once from a directory, keyed by file name.
pub struct HtmlTemplates {
    templates: HashMap<String, String>,
}

impl HtmlTemplates {
    pub fn load(directory: &Path) -> Result<Self, std::io::Error> {
        let mut templates = HashMap::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let contents = std::fs::read_to_string(entry.path())?;
            templates.insert(name, contents);
        }

        tracing::info!(
            count = templates.len(),
            directory = %directory.display(),
            "Loaded view templates"
        );
        Ok(Self { templates })
    }

    pub fn from_templates<I, N, C>(templates: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            templates: templates
                .into_iter()
                .map(|(name, contents)| (name.into(), contents.into()))
                .collect(),
        }
    }
}

impl ViewRenderer for HtmlTemplates {
    fn render(
        &self,
        template: &str,
        submissions: Option<&[Submission]>,
    ) -> Result<String, RenderError> {
        let contents = self
            .templates
            .get(template)
            .ok_or_else(|| RenderError::UnknownTemplate(template.to_string()))?;

        Ok(match submissions {
            None => contents.clone(),
            Some(submissions) => contents.replace(ROWS_PLACEHOLDER, &render_rows(submissions)),
        })
    }
}

fn render_rows(submissions: &[Submission]) -> String {
    submissions
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                htmlescape::encode_minimal(s.first_name()),
                htmlescape::encode_minimal(s.last_name()),
                htmlescape::encode_minimal(s.email()),
                htmlescape::encode_minimal(s.phone_number()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
