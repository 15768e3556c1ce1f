//! The résumé document model.
//!
//! Produced upstream (an optimization service or an editing UI) and consumed
//! by the layout engine. Field names are camelCase on the wire, matching the
//! JSON the upstream producer emits.

use serde::{Deserialize, Serialize};

/// A structured résumé, the sole input to a render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub name: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub work_experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

impl ResumeDocument {
    /// Suggested download filename for the exported PDF.
    pub fn pdf_file_name(&self) -> String {
        format!("{}_Resume.pdf", self.name.replace(' ', "_"))
    }
}

/// Contact fields; absent ones are omitted from the contact line.
/// Display order is fixed: phone, email, linkedin, github.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Contact {
    /// Join the present fields with `" | "`.
    pub fn display_line(&self) -> String {
        [&self.phone, &self.email, &self.linkedin, &self.github]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.email.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub date_range: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// A certification entry as produced upstream.
///
/// The wire shape is heterogeneous: a plain string, `{title, issuer}`, or
/// `{name}`. Anything else is kept as raw JSON and stringified at render
/// time. Normalization happens once, here, not at every render site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    TitleIssuer { title: String, issuer: String },
    Named { name: String },
    Text(String),
    Other(serde_json::Value),
}

impl Certification {
    /// Display string, by fixed precedence: title+issuer, name, raw string,
    /// JSON-stringified fallback.
    pub fn display_text(&self) -> String {
        match self {
            Certification::TitleIssuer { title, issuer } => format!("{title} - {issuer}"),
            Certification::Named { name } => name.clone(),
            Certification::Text(text) => text.clone(),
            Certification::Other(value) => value.to_string(),
        }
    }
}

/// The sections the composer knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
}

impl SectionKind {
    /// The engine's canonical order. The on-screen preview may reorder by
    /// user type; the export order is an explicit caller choice.
    pub fn default_order() -> Vec<SectionKind> {
        vec![
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Projects,
            SectionKind::Skills,
            SectionKind::Certifications,
        ]
    }
}
