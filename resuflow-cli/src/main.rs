use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resuflow::{render_pages, RenderOptions, ResumeDocument, SectionKind};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "resuflow",
    about = "Render a JSON resume into a paginated PDF",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a resume JSON file to PDF
    Export {
        /// Input resume JSON file
        input: PathBuf,

        /// Output file path (defaults to "<Name>_Resume.pdf")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Section order, comma-separated (e.g. "skills,experience,education")
        #[arg(long, value_delimiter = ',')]
        sections: Option<Vec<String>>,

        /// Split long paragraphs across page boundaries line by line
        #[arg(long)]
        split_paragraphs: bool,
    },

    /// Show the paginated layout of a resume without writing a PDF
    Inspect {
        /// Input resume JSON file
        input: PathBuf,
    },

    /// Write a sample resume JSON file to start from
    Sample {
        /// Output file path
        #[arg(short, long, default_value = "resume.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resuflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            sections,
            split_paragraphs,
        } => {
            let doc = load_document(&input)?;
            let mut options = RenderOptions {
                strict_per_line_break: split_paragraphs,
                ..Default::default()
            };
            if let Some(sections) = sections {
                options.section_order = parse_section_order(&sections)?;
            }

            let output = output.unwrap_or_else(|| PathBuf::from(doc.pdf_file_name()));
            resuflow::export_pdf(&doc, &options, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }

        Commands::Inspect { input } => {
            let doc = load_document(&input)?;
            let pages = render_pages(&doc, &RenderOptions::default());
            println!("{} page(s)", pages.len());
            for (i, page) in pages.iter().enumerate() {
                println!(
                    "Page {}: {} text run(s), {} rule(s)",
                    i + 1,
                    page.runs.len(),
                    page.rules.len()
                );
            }
        }

        Commands::Sample { output } => {
            std::fs::write(&output, SAMPLE_RESUME)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

fn load_document(input: &PathBuf) -> Result<ResumeDocument> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let doc: ResumeDocument = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid resume document", input.display()))?;
    tracing::debug!(name = %doc.name, "resume loaded");
    Ok(doc)
}

fn parse_section_order(names: &[String]) -> Result<Vec<SectionKind>> {
    names
        .iter()
        .map(|name| match name.trim().to_lowercase().as_str() {
            "experience" => Ok(SectionKind::Experience),
            "education" => Ok(SectionKind::Education),
            "projects" => Ok(SectionKind::Projects),
            "skills" => Ok(SectionKind::Skills),
            "certifications" => Ok(SectionKind::Certifications),
            other => anyhow::bail!("unknown section: {other}"),
        })
        .collect()
}

const SAMPLE_RESUME: &str = r#"{
  "name": "Jane Doe",
  "contact": {
    "phone": "555-123-4567",
    "email": "jane@example.com",
    "linkedin": "linkedin.com/in/janedoe",
    "github": "github.com/janedoe"
  },
  "summary": "Systems engineer with eight years of experience building storage and networking infrastructure.",
  "workExperience": [
    {
      "role": "Senior Software Engineer",
      "company": "Acme Corp",
      "dateRange": "2020 - Present",
      "bullets": [
        "Led the redesign of the ingestion pipeline, cutting p99 latency by 40%",
        "Mentored four engineers through promotion to senior roles"
      ]
    }
  ],
  "education": [
    {
      "degree": "BSc Computer Science",
      "school": "State University",
      "dateRange": "2012 - 2016"
    }
  ],
  "projects": [
    {
      "title": "resuflow",
      "bullets": ["Deterministic resume-to-PDF renderer written in Rust"]
    }
  ],
  "skills": [
    { "category": "Languages", "items": ["Rust", "Go", "Python"] },
    { "category": "Infrastructure", "items": ["Kubernetes", "Terraform"] }
  ],
  "certifications": [
    { "title": "Solutions Architect", "issuer": "AWS" }
  ]
}
"#;
