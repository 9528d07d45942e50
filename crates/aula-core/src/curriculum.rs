//! Curriculum TOML parser and validation.
//!
//! Loads a course programme from a TOML file and checks it for common
//! authoring mistakes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Course, CourseInfo, Owner, Skills, Unit};

/// Intermediate TOML structure for parsing a course file.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    owner: Option<TomlOwner>,
    #[serde(default)]
    units: Vec<TomlUnit>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    title: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    total_hours: u32,
    #[serde(default)]
    units: u32,
    #[serde(default)]
    hours_per_unit: u32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    target_students: String,
    #[serde(default)]
    general_objectives: Vec<String>,
    #[serde(default)]
    methodology: Vec<String>,
    #[serde(default)]
    assessment: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOwner {
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    bio: String,
}

#[derive(Debug, Deserialize)]
struct TomlUnit {
    number: u32,
    name: String,
    #[serde(default)]
    focus: String,
    #[serde(default)]
    grammar: Vec<String>,
    #[serde(default)]
    vocabulary: Vec<String>,
    #[serde(default)]
    skills: Option<TomlSkills>,
    #[serde(default)]
    image_query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlSkills {
    #[serde(default)]
    speaking: Vec<String>,
    #[serde(default)]
    listening: Vec<String>,
    #[serde(default)]
    reading: Vec<String>,
    #[serde(default)]
    writing: Vec<String>,
}

/// Parse a course programme from a TOML file.
pub fn parse_course(path: &Path) -> Result<Course> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;
    parse_course_str(&content, path)
}

/// Parse a TOML string into a `Course` (useful for testing).
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<Course> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let units = parsed
        .units
        .into_iter()
        .map(|u| {
            let skills = match u.skills {
                Some(s) => Skills {
                    speaking: s.speaking,
                    listening: s.listening,
                    reading: s.reading,
                    writing: s.writing,
                },
                None => Skills::default(),
            };
            Unit {
                number: u.number,
                name: u.name,
                focus: u.focus,
                grammar: u.grammar,
                vocabulary: u.vocabulary,
                skills,
                image_query: u.image_query,
            }
        })
        .collect();

    let owner = match parsed.owner {
        Some(o) => Owner {
            name: o.name,
            role: o.role,
            bio: o.bio,
        },
        None => Owner::default(),
    };

    Ok(Course {
        info: CourseInfo {
            title: parsed.course.title,
            level: parsed.course.level,
            total_hours: parsed.course.total_hours,
            units: parsed.course.units,
            hours_per_unit: parsed.course.hours_per_unit,
            description: parsed.course.description,
            target_students: parsed.course.target_students,
            general_objectives: parsed.course.general_objectives,
            methodology: parsed.course.methodology,
            assessment: parsed.course.assessment,
        },
        owner,
        units,
    })
}

/// A warning from course validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The unit number the warning refers to (if applicable).
    pub unit: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a course programme for common authoring issues.
pub fn validate_course(course: &Course) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if course.info.title.trim().is_empty() {
        warnings.push(ValidationWarning {
            unit: None,
            message: "course title is empty".into(),
        });
    }

    // Declared unit count vs the actual syllabus
    let actual = course.units.len() as u32;
    if course.info.units != 0 && course.info.units != actual {
        warnings.push(ValidationWarning {
            unit: None,
            message: format!(
                "course declares {} units but the syllabus has {actual}",
                course.info.units
            ),
        });
    }

    // Hours arithmetic
    if course.info.total_hours != 0
        && course.info.hours_per_unit != 0
        && course.info.total_hours != actual * course.info.hours_per_unit
    {
        warnings.push(ValidationWarning {
            unit: None,
            message: format!(
                "total_hours is {} but {actual} units x {} hours = {}",
                course.info.total_hours,
                course.info.hours_per_unit,
                actual * course.info.hours_per_unit
            ),
        });
    }

    // Duplicate unit numbers
    let mut seen = std::collections::HashSet::new();
    for unit in &course.units {
        if !seen.insert(unit.number) {
            warnings.push(ValidationWarning {
                unit: Some(unit.number),
                message: format!("duplicate unit number: {}", unit.number),
            });
        }
    }

    // Units with no teaching content at all
    for unit in &course.units {
        if unit.grammar.is_empty() && unit.vocabulary.is_empty() {
            warnings.push(ValidationWarning {
                unit: Some(unit.number),
                message: "unit has no grammar and no vocabulary".into(),
            });
        }
    }

    warnings
}
