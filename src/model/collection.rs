//! Collection-mode input and result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A document listed in the collection input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name (e.g. "report.pdf")
    pub filename: String,
    /// Human-readable title
    pub title: String,
}

impl DocumentRef {
    /// Create a document reference.
    pub fn new(filename: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
        }
    }
}

/// Who is asking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Role, e.g. "Investment Analyst"
    pub role: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other fields, echoed back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Persona {
    /// Create a persona with only a role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            description: None,
            extra: Map::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text contributed to the matching query: `role + " " + description`.
    pub fn query_text(&self) -> String {
        format!("{} {}", self.role, self.description.as_deref().unwrap_or(""))
    }
}

/// What the persona needs done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task statement
    pub task: String,
    /// Any other fields, echoed back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobToBeDone {
    /// Create a job from a task statement.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            extra: Map::new(),
        }
    }
}

/// Collection-mode input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInput {
    /// Documents to analyze, in processing order
    pub documents: Vec<DocumentRef>,
    /// Who is asking
    pub persona: Persona,
    /// What they need
    pub job_to_be_done: JobToBeDone,
}

impl CollectionInput {
    /// Create an input.
    pub fn new(documents: Vec<DocumentRef>, persona: Persona, job: JobToBeDone) -> Self {
        Self {
            documents,
            persona,
            job_to_be_done: job,
        }
    }

    /// Parse and validate collection input JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let input: CollectionInput = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    /// Check structural requirements serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self
            .documents
            .iter()
            .position(|d| d.filename.trim().is_empty())
        {
            return Err(Error::InvalidInput(format!(
                "document #{} has an empty filename",
                pos + 1
            )));
        }
        Ok(())
    }

    /// The combined persona + job query shared by every document.
    pub fn query(&self) -> String {
        format!(
            "{} {}",
            self.persona.query_text(),
            self.job_to_be_done.task.trim()
        )
    }
}

/// A ranked section in the collection result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document filename
    pub document: String,
    /// Page of the section heading (0-based)
    pub page_number: u32,
    /// Section heading text
    pub section_title: String,
    /// 1-based position after sorting by relevance
    pub importance_rank: u32,
}

/// Refined text of one subsection (or of a section with no subsections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document filename
    pub document: String,
    /// Page of the refined block (0-based)
    pub page_number: u32,
    /// Extractive summary
    pub refined_text: String,
}

/// Echo of the inputs plus processing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Documents as listed in the input
    pub input_documents: Vec<DocumentRef>,
    /// Persona as given
    pub persona: Persona,
    /// Job as given
    pub job_to_be_done: JobToBeDone,
    /// When the result was assembled
    pub processing_timestamp: DateTime<Utc>,
}

/// Collection-mode result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    /// Input echo
    pub metadata: CollectionMetadata,
    /// Sections ordered by importance
    pub extracted_sections: Vec<ExtractedSection>,
    /// Refined subsections in document order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
