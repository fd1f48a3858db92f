use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use super::OutputFormat;
use crate::{
    app::{get_config_dir, Config},
    assistant::is_backend_reachable,
    recommend::{
        bloom_level_description, priority_stars, RecommendationClient, RecommendationResponse,
    },
};

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("quizchat v{}", env!("CARGO_PKG_VERSION"));
    println!("   Conversational course quizzes from the terminal");
}

/// Show configuration and backend status
pub async fn show_status(config: &Config, config_path: Option<&Path>, student_id: &str) -> Result<()> {
    println!("quizchat Status:");
    println!();

    if is_backend_reachable(&config.api).await {
        println!("  [OK] Backend: reachable at {}", config.api.base_url);
    } else {
        println!("  [ERROR] Backend: not reachable at {}", config.api.base_url);
    }

    match config_path {
        Some(path) => println!("  [OK] Configuration: {}", path.display()),
        None => {
            let global = get_config_dir()?.join("config.toml");
            if global.exists() {
                println!("  [OK] Configuration: {}", global.display());
            } else {
                println!("  [WARNING] Configuration: Not found (using defaults)");
            }
        }
    }

    println!("  Student: {}", student_id);
    println!("  Timeout: {}s", config.api.timeout_secs);
    println!();
    Ok(())
}

/// Show recommended lessons
pub async fn show_recommendations(
    client: &RecommendationClient,
    student_id: &str,
    max: usize,
    format: OutputFormat,
) -> Result<()> {
    let response = client.recommendations(student_id, max).await?;

    if format == OutputFormat::Json {
        return print_json(&response);
    }

    write_recommendations(&mut io::stdout().lock(), student_id, &response)?;
    Ok(())
}

/// Render a recommendation list as text
pub fn write_recommendations<W: Write>(
    out: &mut W,
    student_id: &str,
    response: &RecommendationResponse,
) -> io::Result<()> {
    writeln!(out, "Recommendations for {}", student_id.bold())?;
    writeln!(
        out,
        "  {} sub-skills not mastered, {} ready to study",
        response.total_non_mastered, response.eligible_for_study
    )?;
    if let Some(message) = &response.message {
        writeln!(out, "  {}", message.dimmed())?;
    }
    writeln!(out)?;

    if response.recommendations.is_empty() {
        writeln!(out, "  Nothing to recommend right now.")?;
        return Ok(());
    }

    for (i, rec) in response.recommendations.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} {} {}",
            i + 1,
            rec.lesson_name.green(),
            format!("[{}]", rec.lesson_id).dimmed(),
            priority_stars(rec.priority_score).yellow()
        )?;
        writeln!(out, "      Level: {}", bloom_level_description(rec.bloom_level))?;
        if !rec.prerequisites.is_empty() {
            writeln!(out, "      Prerequisites: {}", rec.prerequisites.join(", "))?;
        }
        if rec.difficulty_indicators.struggling_students > 0 {
            writeln!(
                out,
                "      {} other students struggle with this lesson",
                rec.difficulty_indicators.struggling_students
            )?;
        }
    }
    Ok(())
}

/// Show the student's profile
pub async fn show_profile(
    client: &RecommendationClient,
    student_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let profile = client.profile(student_id).await?;

    if format == OutputFormat::Json {
        return print_json(&profile);
    }

    let stats = &profile.statistics;
    println!("Profile of {}", profile.student_id.bold());
    println!("  Quizzes taken:   {}", stats.total_quizzes);
    println!("  Average score:   {:.1}%", stats.average_percentage);
    println!(
        "  Mastered:        {} / {}",
        stats.mastered_count,
        stats.mastered_count + stats.not_mastered_count
    );
    if profile.sous_acquis.is_empty() {
        println!("  {}", "Every sub-skill is mastered.".green());
    } else {
        println!("  Sub-skills to work on ({}):", profile.total_non_mastered);
        for skill in &profile.sous_acquis {
            println!("    • {}", skill.yellow());
        }
    }
    Ok(())
}

/// Show the student's quiz statistics
pub async fn show_statistics(
    client: &RecommendationClient,
    student_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let stats = client.statistics(student_id).await?;

    if format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("Statistics for {}", stats.student_id.bold());
    println!("  Quizzes taken:       {}", stats.statistics.total_quizzes);
    println!("  Average score:       {:.1}", stats.statistics.average_score);
    println!("  Average percentage:  {:.1}%", stats.statistics.average_percentage);
    println!("  Mastery rate:        {:.0}%", stats.statistics.mastery_rate);
    println!("  Mastery threshold:   {:.0}%", stats.mastery_threshold);
    println!("  Not yet mastered:    {}", stats.current_non_mastered);
    Ok(())
}

/// Show recommendation model information
pub async fn show_model_info(client: &RecommendationClient, format: OutputFormat) -> Result<()> {
    let info = client.model_info().await?;

    if format == OutputFormat::Json {
        return print_json(&info);
    }

    if info.gcn_available {
        println!("  [OK] Recommendation model: available");
    } else {
        println!("  [WARNING] Recommendation model: not available");
    }
    if let Some(threshold) = info.mastery_threshold {
        println!("  Mastery threshold: {:.0}%", threshold);
    }
    if let Some(message) = &info.message {
        println!("  {}", message);
    }
    Ok(())
}
