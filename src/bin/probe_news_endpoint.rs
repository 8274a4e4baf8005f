use anyhow::Result;
use colored::Colorize;
use newsai::feed::{probe_feed, ProbeStatus};
use newsai::logging;
use std::env;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    logging::configure_logging();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        return Ok(());
    }

    let url = &args[1];

    println!("Probing news endpoint: {}", url);

    match probe_feed(url).await {
        Ok(report) => {
            println!("\n{}", "═".repeat(100).bright_blue());
            println!(
                "{}  {}",
                "ENDPOINT DIAGNOSTICS".bright_blue(),
                url.bright_yellow()
            );
            println!("{}", "═".repeat(100).bright_blue());

            // Print status with appropriate color
            let status_str = format!("{:?}", report.status);
            let colored_status = match report.status {
                ProbeStatus::Success => status_str.bright_green(),
                ProbeStatus::RequestFailed => status_str.bright_red(),
                ProbeStatus::ParseError => status_str.bright_yellow(),
            };
            println!("{}: {}", "Status".bright_blue(), colored_status);

            // Print HTTP status if available
            if let Some(http_status) = report.http_status {
                println!("{}: {}", "HTTP Status".bright_blue(), http_status);
            } else {
                println!("{}: {}", "HTTP Status".bright_blue(), "None".dimmed());
            }

            // Print Content-Type if available
            if let Some(ref content_type) = report.content_type {
                println!("{}: {}", "Content-Type".bright_blue(), content_type);
            } else {
                println!("{}: {}", "Content-Type".bright_blue(), "None".dimmed());
            }

            // Print detected payload shape
            println!("{}: {}", "Payload Shape".bright_blue(), report.shape.as_str());

            // Print articles found
            println!(
                "{}: {}",
                "Articles Found".bright_blue(),
                report.articles_found
            );

            // Print per-category tallies if any
            if !report.per_category.is_empty() {
                println!("\n{}", "Per-Category Tallies".bright_blue());
                println!("{}", "─".repeat(80).dimmed());
                for (category, count) in &report.per_category {
                    println!("{}: {}", category.as_str().bright_magenta(), count);
                }
            }

            // Print warnings if any
            if !report.warnings.is_empty() {
                println!("\n{}", "Warnings".bright_yellow());
                println!("{}", "─".repeat(80).dimmed());
                for (i, warning) in report.warnings.iter().enumerate() {
                    println!("{}. {}", i + 1, warning);
                }
            }

            // Print errors if any
            if !report.errors.is_empty() {
                println!("\n{}", "Errors".bright_red());
                println!("{}", "─".repeat(80).dimmed());
                for (i, error) in report.errors.iter().enumerate() {
                    println!("{}. {}", i + 1, error.bright_red());
                }
            }

            // Print a preview of the articles if any
            if !report.preview.is_empty() {
                println!("\n{}", "Article Preview".bright_green());
                println!("{}", "─".repeat(80).dimmed());
                for (i, (id, title)) in report.preview.iter().enumerate() {
                    println!(
                        "{}. {} ({})",
                        i + 1,
                        title.bright_white(),
                        format!("id {}", id).dimmed()
                    );
                }
                if report.articles_found > report.preview.len() {
                    println!(
                        "... and {} more articles",
                        report.articles_found - report.preview.len()
                    );
                }
            }

            println!("\n{}", "═".repeat(100).bright_blue());

            // Return error code if the endpoint had problems
            match report.status {
                ProbeStatus::Success => {
                    println!(
                        "Probe completed successfully with {} articles found",
                        report.articles_found
                    );
                    process::exit(0);
                }
                _ => {
                    eprintln!("Probe completed with errors: {:?}", report.status);
                    process::exit(1);
                }
            }
        }
        Err(err) => {
            eprintln!("Failed to probe endpoint: {}", err);
            process::exit(2);
        }
    }
}

// Print usage instructions
fn print_usage(program_name: &str) {
    println!("Usage: {} <endpoint_url>", program_name);
    println!("\nExamples:");
    println!("  {} http://localhost:3000/api/news", program_name);
    println!("  {} https://news.example.com/api/news", program_name);
}
