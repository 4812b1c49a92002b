use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The portfolio owner's resume. Loaded once and only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: SkillGroups,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub contact: Contact,
}

impl ResumeData {
    pub fn skill_count(&self) -> usize {
        self.skills.iter().map(|(_, skills)| skills.len()).sum()
    }

    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    #[serde(default)]
    pub field: String,
    pub school: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub github: Option<String>,
    #[serde(
        default,
        deserialize_with = "non_empty_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub live: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
}

fn non_empty_link<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty()))
}

/// Skills grouped by category, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillGroups(Vec<(String, Vec<String>)>);

impl SkillGroups {
    pub fn new(groups: Vec<(String, Vec<String>)>) -> Self {
        Self(groups)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(category, skills)| (category.as_str(), skills.as_slice()))
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(category, _)| category.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SkillGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, skills) in &self.0 {
            map.serialize_entry(category, skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = SkillGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill category to skill names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, skills)) = access.next_entry::<String, Vec<String>>()? {
                    groups.push((category, skills));
                }
                Ok(SkillGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}
