//! The `aula page` command.
//!
//! Renders the course pages to the terminal. Page identity goes through
//! the same allow-list the web variants used: unknown names land on the
//! overview page.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use aula_core::curriculum::parse_course;
use aula_core::model::{Course, Unit};
use aula_core::nav::Page;
use aula_core::traits::{ImageHit, ImageQuery};
use aula_media::{create_image_source, load_config_from, AulaConfig};
use aula_store::ContentStore;

/// Shown when no image provider is configured or the lookup fails.
const FALLBACK_IMAGE_URL: &str = "https://picsum.photos/960/540";

/// Content keys a lesson page looks for.
const LESSON_BLOCK_KEYS: [&str; 2] = ["script", "dialogue"];

pub async fn execute(
    name: Option<String>,
    unit: Option<u32>,
    class: u32,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let course = parse_course(&config.course_file)?;

    let page = Page::from_query(name.as_deref());
    match page {
        Page::Overview => overview(&course),
        Page::Syllabus => syllabus(&course, unit)?,
        Page::Assessment => assessment(&course),
        Page::About => about(&course),
        Page::Lesson => lesson(&course, &config, unit.unwrap_or(1), class).await?,
        Page::Review | Page::Content => {
            println!("The {page} page is admin-only; use `aula review` or `aula content`.");
        }
    }

    Ok(())
}

fn bullets(items: &[String]) {
    for item in items {
        println!("  - {item}");
    }
}

fn overview(course: &Course) {
    let info = &course.info;
    println!("{}", info.title);
    println!("{}\n", info.level);
    println!("Number of units: {}", info.units);
    println!("Approx. hours per unit: {}", info.hours_per_unit);
    println!("Total hours (suggested): {}\n", info.total_hours);

    println!("Description");
    println!("{}\n", info.description);
    println!("Target students");
    println!("{}\n", info.target_students);

    println!("General objectives");
    bullets(&info.general_objectives);
    println!("\nMethodology");
    bullets(&info.methodology);
    println!("\nAssessment");
    bullets(&info.assessment);
}

fn syllabus(course: &Course, unit_number: Option<u32>) -> Result<()> {
    let unit = match unit_number {
        Some(n) => course
            .unit(n)
            .ok_or_else(|| anyhow::anyhow!("no unit {n} in {}", course.info.title))?,
        None => course
            .units
            .first()
            .ok_or_else(|| anyhow::anyhow!("the course has no units"))?,
    };

    println!("Unit {}: {}", unit.number, unit.name);
    println!("Focus: {}\n", unit.focus);

    println!("Grammar");
    bullets(&unit.grammar);
    println!("\nVocabulary");
    bullets(&unit.vocabulary);

    println!("\nSkills");
    for (label, items) in [
        ("Speaking", &unit.skills.speaking),
        ("Listening", &unit.skills.listening),
        ("Reading", &unit.skills.reading),
        ("Writing", &unit.skills.writing),
    ] {
        if !items.is_empty() {
            println!("  {label}");
            for item in items {
                println!("    - {item}");
            }
        }
    }

    println!("\nSuggested time distribution per unit");
    let mut table = Table::new();
    table.set_header(vec!["Stage", "Minutes"]);
    for (stage, minutes) in [
        ("Presentation & warm-up", 30),
        ("Grammar & vocabulary input", 60),
        ("Controlled practice", 60),
        ("Communication & tasks", 60),
        ("Review & assessment", 30),
    ] {
        table.add_row(vec![Cell::new(stage), Cell::new(minutes)]);
    }
    println!("{table}");

    Ok(())
}

fn assessment(course: &Course) {
    println!("Assessment & Progress\n");

    println!("Suggested assessment structure");
    println!("  - Unit progress checks every 2 units (Units 1-2, 3-4, 5-6, 7-8, 9-10).");
    println!("  - Mid-course assessment after Unit 5:");
    println!("      short listening, reading comprehension, guided writing,");
    println!("      short speaking interview.");
    println!("  - Final exam after Unit 10:");
    println!("      listening (everyday situations), reading (two short texts),");
    println!("      writing (email + short paragraph), speaking (interview + role play).\n");

    println!("Example weighting");
    let mut table = Table::new();
    table.set_header(vec!["Component", "Weight"]);
    for (component, weight) in [
        ("Class participation & homework", "20%"),
        ("Unit progress checks", "30%"),
        ("Mid-course assessment", "20%"),
        ("Final exam", "30%"),
    ] {
        table.add_row(vec![Cell::new(component), Cell::new(weight)]);
    }
    println!("{table}");

    println!("\nYou can adapt the weighting and instruments to the needs of your group.");
    if !course.info.assessment.is_empty() {
        println!("\nCourse assessment instruments");
        bullets(&course.info.assessment);
    }
}

fn about(course: &Course) {
    println!("About the Programme Owner\n");
    println!("Name: {}", course.owner.name);
    println!("Role: {}", course.owner.role);
    if !course.owner.bio.is_empty() {
        println!("\n{}", course.owner.bio);
    }
}

async fn lesson(course: &Course, config: &AulaConfig, unit_number: u32, class: u32) -> Result<()> {
    let unit = course
        .unit(unit_number)
        .ok_or_else(|| anyhow::anyhow!("no unit {unit_number} in {}", course.info.title))?;

    println!("Unit {}, class {class}: {}", unit.number, unit.name);
    println!("Focus: {}\n", unit.focus);

    let image = lookup_image(config, unit).await;
    println!("Illustration: {}", image.url);
    if let Some(attribution) = &image.attribution {
        println!("{attribution}");
    }
    println!();

    let store = ContentStore::new(config.content_dir());
    for key in LESSON_BLOCK_KEYS {
        match store.load(unit.number, class, key) {
            Ok(Some(text)) => {
                println!("--- {key} ---");
                println!("{text}\n");
            }
            Ok(None) => println!("--- {key} --- (not added yet)\n"),
            Err(e) => {
                tracing::warn!("could not load content block {key}: {e}");
                eprintln!("Warning: could not load the {key} block ({e}).");
            }
        }
    }

    Ok(())
}

/// Fetch the unit illustration, degrading to the placeholder on any
/// trouble: unconfigured provider, API failure, or no results.
async fn lookup_image(config: &AulaConfig, unit: &Unit) -> ImageHit {
    let Some(pconfig) = config.providers.get(&config.image_provider) else {
        return ImageHit::placeholder(FALLBACK_IMAGE_URL);
    };
    // An unset key resolves to an empty string; don't bother calling out
    if pconfig.api_key().is_some_and(|k| k.is_empty()) {
        return ImageHit::placeholder(FALLBACK_IMAGE_URL);
    }
    let source = match create_image_source(&config.image_provider, pconfig) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("image provider misconfigured: {e}");
            return ImageHit::placeholder(FALLBACK_IMAGE_URL);
        }
    };

    match source.search(&ImageQuery::new(&unit.image_query())).await {
        Ok(Some(hit)) => hit,
        Ok(None) => ImageHit::placeholder(FALLBACK_IMAGE_URL),
        Err(e) => {
            tracing::warn!("image lookup failed: {e:#}");
            ImageHit::placeholder(FALLBACK_IMAGE_URL)
        }
    }
}
