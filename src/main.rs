use anyhow::Context;
use clap::Parser;
use content_crew::domain::ports::Storage;
use content_crew::utils::error::ErrorSeverity;
use content_crew::utils::{logger, validation::Validate};
use content_crew::{build_engine, CliConfig, CrewError, LocalStorage, PreviewCapture};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting content-crew CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    match run(&config).await {
        Ok(report) => {
            tracing::info!("✅ Generation completed successfully!");
            println!("{}", report.summary_line());
            if let Some(e) = &report.preview_error {
                exit_with(e);
            }
            Ok(())
        }
        Err(RunError::Crew(e)) => {
            tracing::error!(
                "❌ Generation failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            exit_with(&e);
        }
        Err(RunError::Other(e)) => Err(e),
    }
}

/// 一次執行的結果；要求的 PNG 沒截成時帶著錯誤
struct RunReport {
    run_dir: String,
    preview_error: Option<CrewError>,
}

impl RunReport {
    fn summary_line(&self) -> String {
        match &self.preview_error {
            Some(_) => format!(
                "📁 Output saved to: {} (preview PNG was not captured)",
                self.run_dir
            ),
            None => format!("📁 Output saved to: {}", self.run_dir),
        }
    }
}

enum RunError {
    Crew(CrewError),
    Other(anyhow::Error),
}

impl From<CrewError> for RunError {
    fn from(e: CrewError) -> Self {
        RunError::Crew(e)
    }
}

async fn run(config: &CliConfig) -> Result<RunReport, RunError> {
    let settings = config.load_settings()?;
    let request = config.request();
    let engine = build_engine(&settings, &request)?;

    let outcome = engine.run(&request).await?;
    let result = &outcome.result;

    println!("\n{}\n", result.content);
    let mut preview_error = None;

    // 每次執行一個目錄
    let run_dir = format!(
        "{}_{}",
        request.platform,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let storage = LocalStorage::new(settings.output.directory.clone());
    let content_path = storage
        .write_file(&format!("{}/content.txt", run_dir), result.content.as_bytes())
        .await?;
    tracing::info!("💾 Content saved to: {}", content_path);

    if let Some(preview_html) = &outcome.preview_html {
        let page = content_crew::LinkedInPreview::render_page(preview_html);
        let preview_path = storage
            .write_file(&format!("{}/preview.html", run_dir), page.as_bytes())
            .await?;
        println!("👀 Preview: {}", preview_path);

        if let Some(png) = &config.preview_png {
            let capture = PreviewCapture::from_config(&settings.preview);
            let content = result.content.clone();
            let images: Vec<PathBuf> = result.image_path.iter().cloned().collect();
            let png_path = PathBuf::from(png);

            let captured = tokio::task::spawn_blocking(move || {
                capture.save_preview_as_png(&content, &images, &png_path)
            })
            .await
            .context("preview capture task panicked")
            .map_err(RunError::Other)?;

            // 截圖失敗不影響已產生的內容，留到最後回報
            match captured {
                Ok(path) => println!("📸 Preview image: {}", path.display()),
                Err(e) => {
                    tracing::warn!("⚠️ {}", e);
                    preview_error = Some(e);
                }
            }
        }
    } else if config.preview_png.is_some() {
        tracing::warn!("⚠️ --preview-png only applies to LinkedIn posts, skipping");
    }

    Ok(RunReport {
        run_dir: format!("{}/{}", settings.output.directory, run_dir),
        preview_error,
    })
}

fn exit_with(e: &CrewError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
