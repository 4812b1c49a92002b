//! Static presentation tables for the skills section.

use std::borrow::Cow;

/// Marker for skills missing from the icon table.
pub const DEFAULT_SKILL_ICON: &str = "</>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Violet,
    Emerald,
    Amber,
    Rose,
    Cyan,
    Zinc,
}

impl Accent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accent::Violet => "violet",
            Accent::Emerald => "emerald",
            Accent::Amber => "amber",
            Accent::Rose => "rose",
            Accent::Cyan => "cyan",
            Accent::Zinc => "zinc",
        }
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMeta {
    pub label: Cow<'static, str>,
    pub accent: Accent,
}

const CATEGORIES: &[(&str, &str, Accent)] = &[
    ("frontend", "Frontend", Accent::Violet),
    ("backend", "Backend", Accent::Emerald),
    ("databases", "Databases", Accent::Amber),
    ("devops_tools", "DevOps & Tools", Accent::Rose),
    ("core_skills", "Core Skills", Accent::Cyan),
];

/// Display label and accent for a skill category. Unknown categories keep
/// their key as the label and get the neutral accent.
pub fn category_meta(category: &str) -> CategoryMeta {
    CATEGORIES
        .iter()
        .find(|(key, _, _)| *key == category)
        .map(|(_, label, accent)| CategoryMeta {
            label: Cow::Borrowed(*label),
            accent: *accent,
        })
        .unwrap_or_else(|| CategoryMeta {
            label: Cow::Owned(category.to_string()),
            accent: Accent::Zinc,
        })
}

const SERVER: &str = "▤";
const COG: &str = "⚙";
const CHIP: &str = "◈";
const SHIELD: &str = "⛨";
const DATABASE: &str = "⛁";
const BOLT: &str = "⚡";
const BRAND: &str = "◆";

const SKILL_ICONS: &[(&str, &str)] = &[
    ("Next.js 14", BRAND),
    ("React 18", BRAND),
    ("React", BRAND),
    ("TypeScript", BRAND),
    ("Tailwind CSS 4", BRAND),
    ("Tailwind CSS", BRAND),
    ("TanStack Query", BOLT),
    ("Shadcn UI", DEFAULT_SKILL_ICON),
    ("Framer Motion", BOLT),
    ("Zustand", CHIP),
    ("Node.js", BRAND),
    ("Express.js", SERVER),
    ("Python", BRAND),
    ("FastAPI", BRAND),
    ("RESTful APIs", SERVER),
    ("REST APIs", SERVER),
    ("Inngest", COG),
    ("Nodemailer", "✉"),
    ("Better Auth", SHIELD),
    ("Axios", SERVER),
    ("MongoDB", BRAND),
    ("PostgreSQL", BRAND),
    ("Drizzle ORM", DATABASE),
    ("NeonDB", DATABASE),
    ("SQLite", BRAND),
    ("Redis", DATABASE),
    ("Git", BRAND),
    ("GitHub", BRAND),
    ("Vercel", BRAND),
    ("Railway", SERVER),
    ("Docker", BRAND),
    ("Postman", COG),
    ("VS Code", DEFAULT_SKILL_ICON),
    ("Data Structures & Algorithms", DEFAULT_SKILL_ICON),
    ("System Design", CHIP),
    ("Component Architecture", DEFAULT_SKILL_ICON),
    ("Unit Testing", SHIELD),
    ("Testing", SHIELD),
];

pub fn skill_icon(skill: &str) -> &'static str {
    SKILL_ICONS
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_SKILL_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        let meta = category_meta("devops_tools");
        assert_eq!(meta.label, "DevOps & Tools");
        assert_eq!(meta.accent, Accent::Rose);

        assert_eq!(category_meta("frontend").accent, Accent::Violet);
        assert_eq!(category_meta("core_skills").label, "Core Skills");
    }

    #[test]
    fn test_unknown_category_falls_back_to_key() {
        let meta = category_meta("languages");
        assert_eq!(meta.label, "languages");
        assert_eq!(meta.accent, Accent::Zinc);
    }

    #[test]
    fn test_skill_icons() {
        assert_eq!(skill_icon("Unit Testing"), SHIELD);
        assert_eq!(skill_icon("Drizzle ORM"), DATABASE);
        assert_eq!(skill_icon("COBOL"), DEFAULT_SKILL_ICON);
        assert_eq!(skill_icon("git"), DEFAULT_SKILL_ICON);
    }
}
