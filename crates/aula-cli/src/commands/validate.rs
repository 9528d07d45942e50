//! The `aula validate` command.

use std::path::PathBuf;

use anyhow::Result;

use aula_core::curriculum::{parse_course, validate_course};
use aula_media::load_config_from;

pub fn execute(course_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = course_path.unwrap_or_else(|| config.course_file.clone());

    let course = parse_course(&path)?;
    println!(
        "{}: {} units ({})",
        course.info.title,
        course.units.len(),
        path.display()
    );

    let warnings = validate_course(&course);
    if warnings.is_empty() {
        println!("Course file valid.");
    } else {
        for warning in &warnings {
            match warning.unit {
                Some(unit) => println!("  warning (unit {unit}): {}", warning.message),
                None => println!("  warning: {}", warning.message),
            }
        }
        println!("{} warnings", warnings.len());
    }

    Ok(())
}
