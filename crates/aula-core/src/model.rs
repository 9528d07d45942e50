//! Curriculum data model.
//!
//! These are the fundamental types describing the course programme:
//! course-level metadata, the unit syllabus, and the skills covered
//! by each unit.

use serde::{Deserialize, Serialize};

/// Course-level metadata shown on the overview page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course title (e.g. "A2 Elementary English Course").
    pub title: String,
    /// CEFR level label.
    #[serde(default)]
    pub level: String,
    /// Suggested total contact hours.
    #[serde(default)]
    pub total_hours: u32,
    /// Declared number of units. Validated against the actual unit list.
    #[serde(default)]
    pub units: u32,
    /// Approximate hours per unit.
    #[serde(default)]
    pub hours_per_unit: u32,
    /// Free-text course description.
    #[serde(default)]
    pub description: String,
    /// Who the course is aimed at.
    #[serde(default)]
    pub target_students: String,
    /// General learning objectives.
    #[serde(default)]
    pub general_objectives: Vec<String>,
    /// Methodology bullet points.
    #[serde(default)]
    pub methodology: Vec<String>,
    /// Assessment instruments.
    #[serde(default)]
    pub assessment: Vec<String>,
}

/// The person or team the "about" page describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Display name.
    pub name: String,
    /// Role line under the name.
    #[serde(default)]
    pub role: String,
    /// Short biography paragraph.
    #[serde(default)]
    pub bio: String,
}

impl Default for Owner {
    fn default() -> Self {
        Self {
            name: "Course Team".to_string(),
            role: "English Instructor".to_string(),
            bio: String::new(),
        }
    }
}

/// Skills practised in one unit, grouped the way lesson pages render them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub speaking: Vec<String>,
    #[serde(default)]
    pub listening: Vec<String>,
    #[serde(default)]
    pub reading: Vec<String>,
    #[serde(default)]
    pub writing: Vec<String>,
}

/// One unit of the syllabus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unit number, 1-based.
    pub number: u32,
    /// Unit name (e.g. "Daily Life").
    pub name: String,
    /// One-line focus statement.
    #[serde(default)]
    pub focus: String,
    /// Grammar points covered.
    #[serde(default)]
    pub grammar: Vec<String>,
    /// Vocabulary areas covered.
    #[serde(default)]
    pub vocabulary: Vec<String>,
    /// Skills work for this unit.
    #[serde(default)]
    pub skills: Skills,
    /// Search query for the unit's illustration image.
    #[serde(default)]
    pub image_query: Option<String>,
}

impl Unit {
    /// The image search query for this unit, derived from the name when
    /// none is configured.
    pub fn image_query(&self) -> String {
        self.image_query
            .clone()
            .unwrap_or_else(|| format!("{} everyday life", self.name))
    }
}

/// A complete course programme: metadata plus the unit syllabus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub info: CourseInfo,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Course {
    /// Look up a unit by its number.
    pub fn unit(&self, number: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_unit() -> Unit {
        Unit {
            number: 2,
            name: "Daily Life".into(),
            focus: "Routines, free time and frequency.".into(),
            grammar: vec!["Present simple".into(), "Adverbs of frequency".into()],
            vocabulary: vec!["Daily routines".into()],
            skills: Skills {
                speaking: vec!["Talk about what you do every day".into()],
                listening: vec!["Conversations about routines".into()],
                reading: vec!["An article about habits".into()],
                writing: vec!["Write an email about your routine".into()],
            },
            image_query: None,
        }
    }

    #[test]
    fn unit_lookup_by_number() {
        let course = Course {
            info: CourseInfo {
                title: "A2 Elementary English Course".into(),
                level: "A2".into(),
                total_hours: 60,
                units: 1,
                hours_per_unit: 6,
                description: String::new(),
                target_students: String::new(),
                general_objectives: vec![],
                methodology: vec![],
                assessment: vec![],
            },
            owner: Owner::default(),
            units: vec![sample_unit()],
        };
        assert_eq!(course.unit(2).unwrap().name, "Daily Life");
        assert!(course.unit(9).is_none());
    }

    #[test]
    fn image_query_falls_back_to_name() {
        let mut unit = sample_unit();
        assert_eq!(unit.image_query(), "Daily Life everyday life");
        unit.image_query = Some("morning routine".into());
        assert_eq!(unit.image_query(), "morning routine");
    }

    #[test]
    fn unit_serde_roundtrip() {
        let unit = sample_unit();
        let json = serde_json::to_string(&unit).unwrap();
        let back: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(back.number, 2);
        assert_eq!(back.skills.speaking.len(), 1);
    }
}
