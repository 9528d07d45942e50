//! The `aula init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create aula.toml
    if std::path::Path::new("aula.toml").exists() {
        println!("aula.toml already exists, skipping.");
    } else {
        std::fs::write("aula.toml", SAMPLE_CONFIG)?;
        println!("Created aula.toml");
    }

    // Create the course programme file
    std::fs::create_dir_all("course")?;
    let course_path = std::path::Path::new("course/a2-elementary.toml");
    if course_path.exists() {
        println!("course/a2-elementary.toml already exists, skipping.");
    } else {
        std::fs::write(course_path, A2_COURSE)?;
        println!("Created course/a2-elementary.toml");
    }

    // Create the data directories
    for dir in ["data", "data/content", "data/audio"] {
        std::fs::create_dir_all(dir)?;
    }
    println!("Created data directories");

    println!("\nNext steps:");
    println!("  1. Edit aula.toml with your API keys (optional)");
    println!("  2. Run: aula validate");
    println!("  3. Run: aula page overview");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# aula configuration

data_dir = "./data"
course_file = "./course/a2-elementary.toml"

speech_provider = "elevenlabs"
default_voice = "21m00Tcm4TlvDq8ikWAM"
image_provider = "pexels"

[providers.elevenlabs]
type = "elevenlabs"
api_key = "${ELEVENLABS_API_KEY}"

[providers.pexels]
type = "pexels"
api_key = "${PEXELS_API_KEY}"
"#;

const A2_COURSE: &str = include_str!("../../../../course/a2-elementary.toml");
