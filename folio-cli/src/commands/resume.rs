use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use folio_core::resume::provider_from_config;
use folio_core::{category_meta, skill_icon, FolioConfig, ResumeData};

use super::{accent_color, section_header, OutputFormat};

const SECTIONS: &[&str] = &[
    "about",
    "skills",
    "projects",
    "experience",
    "education",
    "contact",
];

pub async fn cmd_resume(
    config: &FolioConfig,
    section: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let section = section.map(str::to_lowercase);
    if let Some(section) = section.as_deref() {
        if !SECTIONS.contains(&section) {
            bail!(
                "Unknown section '{}'. Must be one of: {}",
                section,
                SECTIONS.join(", ")
            );
        }
    }

    let provider = provider_from_config(config)?;
    let resume = provider
        .load()
        .await
        .ok_or_else(|| anyhow!("Resume unavailable from {}", provider.describe()))?;

    if format == OutputFormat::Json {
        let output = match section.as_deref() {
            Some(section) => section_json(&resume, section)?,
            None => serde_json::to_value(&resume)?,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match section.as_deref() {
        Some(section) => print_section(&resume, section),
        None => {
            print_hero(&resume);
            for section in SECTIONS {
                print_section(&resume, section);
            }
        }
    }

    Ok(())
}

fn section_json(resume: &ResumeData, section: &str) -> Result<serde_json::Value> {
    let value = match section {
        "about" => serde_json::json!({ "about": resume.about }),
        "skills" => serde_json::to_value(&resume.skills)?,
        "projects" => serde_json::to_value(&resume.projects)?,
        "experience" => serde_json::to_value(&resume.experience)?,
        "education" => serde_json::to_value(&resume.education)?,
        "contact" => serde_json::to_value(&resume.contact)?,
        other => bail!("Unknown section '{}'", other),
    };
    Ok(value)
}

fn print_hero(resume: &ResumeData) {
    println!("{}", resume.name.bold());
    println!("{}", resume.title.cyan());
    if !resume.tagline.is_empty() {
        println!("{}", resume.tagline.dimmed());
    }
}

fn print_section(resume: &ResumeData, section: &str) {
    match section {
        "about" => print_about(resume),
        "skills" => print_skills(resume),
        "projects" => print_projects(resume),
        "experience" => print_experience(resume),
        "education" => print_education(resume),
        "contact" => print_contact(resume),
        _ => {}
    }
}

fn print_about(resume: &ResumeData) {
    if resume.about.is_empty() {
        return;
    }
    section_header("About");
    println!("{}", resume.about);
}

fn print_skills(resume: &ResumeData) {
    if resume.skills.is_empty() {
        return;
    }
    section_header("Tech Stack");

    for (category, skills) in resume.skills.iter() {
        let meta = category_meta(category);
        let color = accent_color(meta.accent);
        println!("  {}", meta.label.to_uppercase().color(color).bold());

        let line = skills
            .iter()
            .map(|skill| format!("{} {}", skill_icon(skill).color(color), skill))
            .collect::<Vec<_>>()
            .join("   ");
        println!("    {}", line);
    }
}

fn print_projects(resume: &ResumeData) {
    if resume.projects.is_empty() {
        return;
    }
    section_header("Projects");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Project").fg(Color::White),
            Cell::new("Description").fg(Color::White),
            Cell::new("Tech").fg(Color::White),
            Cell::new("Links").fg(Color::White),
        ]);

    for project in &resume.projects {
        let links = [
            project.github.as_deref().map(|url| format!("code: {}", url)),
            project.live.as_deref().map(|url| format!("live: {}", url)),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        table.add_row(vec![
            Cell::new(&project.name).fg(Color::Cyan),
            Cell::new(&project.description),
            Cell::new(project.tech.join(", ")),
            Cell::new(if links.is_empty() {
                "-".to_string()
            } else {
                links.join("\n")
            }),
        ]);
    }

    println!("{table}");
}

fn print_experience(resume: &ResumeData) {
    if resume.experience.is_empty() {
        return;
    }
    section_header("Experience");

    for job in &resume.experience {
        println!(
            "  {} {} {}",
            job.role.bold(),
            "@".dimmed(),
            job.company.cyan()
        );
        if !job.duration.is_empty() {
            println!("    {}", job.duration.dimmed());
        }
        for highlight in &job.highlights {
            println!("    {} {}", "•".blue(), highlight);
        }
    }
}

fn print_education(resume: &ResumeData) {
    if resume.education.is_empty() {
        return;
    }
    section_header("Education");

    for entry in &resume.education {
        let degree = if entry.field.is_empty() {
            entry.degree.clone()
        } else {
            format!("{} in {}", entry.degree, entry.field)
        };
        println!("  {}", degree.bold());
        println!("    {} {}", entry.school.cyan(), entry.year.dimmed());
        for highlight in &entry.highlights {
            println!("    {} {}", "•".blue(), highlight);
        }
    }
}

fn print_contact(resume: &ResumeData) {
    section_header("Contact");

    let contact = &resume.contact;
    println!("  {:<10} {}", "Email:".bold(), contact.email);
    if !contact.github.is_empty() {
        println!("  {:<10} {}", "GitHub:".bold(), contact.github);
    }
    if !contact.linkedin.is_empty() {
        println!("  {:<10} {}", "LinkedIn:".bold(), contact.linkedin);
    }
}
