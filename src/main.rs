use clap::Parser;
use cv_forge::core::duration::DurationFormatter;
use cv_forge::utils::{logger, validation::Validate};
use cv_forge::{
    AllowListSanitizer, BuildOutcome, CliConfig, CvDocument, CvError, CvRenderer, CvValidator,
    LocalFileSink, SiteBuilder, SiteConfig,
};

const EXIT_CONFIG: i32 = 1;
const EXIT_INVALID_DOCUMENT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting cv-forge");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e, EXIT_CONFIG),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e, EXIT_CONFIG);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let renderer = CvRenderer::new(
        AllowListSanitizer::new(),
        DurationFormatter::now(),
        config.page_options(),
    );
    let builder = SiteBuilder::new(config.document_source(), renderer, CvValidator::new())
        .with_maintenance_message(config.maintenance_message());

    if cli.check {
        tracing::info!("🔍 CHECK MODE - nothing will be written");
        match builder.check().await {
            Ok(cv) => {
                display_document_summary(&cv);
                println!("✅ cv.json is valid");
            }
            Err(e) => {
                let code = if e.as_validation().is_some() {
                    EXIT_INVALID_DOCUMENT
                } else {
                    EXIT_CONFIG
                };
                exit_with(&e, code);
            }
        }
        return Ok(());
    }

    let sink = LocalFileSink::new(config.output_path());
    match builder.build_to(&sink).await {
        Ok((build, location)) => {
            match build.outcome {
                BuildOutcome::Rendered { document } => {
                    println!("✅ Rendered {}.json", document);
                }
                BuildOutcome::Maintenance => {
                    println!("⚠️  No usable CV data, wrote the maintenance page");
                }
            }
            println!("📁 Output saved to: {}", location);
        }
        Err(e) => {
            tracing::error!("❌ Failed to write output: {}", e);
            exit_with(&e, EXIT_OUTPUT);
        }
    }

    Ok(())
}

fn exit_with(error: &CvError, code: i32) -> ! {
    tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(code);
}

fn display_config_summary(config: &SiteConfig) {
    println!("📋 Configuration Summary:");
    match (&config.source.url, &config.source.path) {
        (Some(url), _) => println!("   📥 Data URL: {}", url),
        (None, Some(path)) => println!("   📥 Data directory: {}", path),
        (None, None) => {}
    }
    println!("   📤 Output: {}", config.output_path());
    println!("   🎨 Theme: {}", config.page.theme);
    println!("   🌐 Language: {}", config.page.lang);
    println!();
}

fn display_document_summary(cv: &CvDocument) {
    println!("👤 {}", cv.name);
    println!("   💼 Experience entries: {}", cv.experience.len());
    println!("   🧰 Expertise areas: {}", cv.expertise.len());
    println!("   🎓 Education entries: {}", cv.education.len());
    println!("   🔗 Links: {}", cv.contacts.links.len());
}
