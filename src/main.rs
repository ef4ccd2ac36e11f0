use clap::Parser;
use site_audit::report::AuditSummary;
use site_audit::{Audit, CheckOutcome};

mod args;
use args::{Args, convert_suites};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting audit for: {}", args.base_url);

    println!("Note: audit cases require a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL or pass --webdriver-url if not using the default http://localhost:4444"
    );

    // Create an Audit builder with the specified parameters
    let mut audit = Audit::new(&args.base_url)
        .with_suites(convert_suites(args.suite))
        .with_case_timeout(args.case_timeout)
        .with_retries(args.retries);

    if let Some(config) = &args.config {
        audit = match audit.with_config_file(config) {
            Ok(audit) => audit,
            Err(e) => {
                ::log::error!("Failed to load config file: {}", e);
                std::process::exit(2);
            }
        };
    }

    if let Some(webdriver_url) = &args.webdriver_url {
        audit = audit.with_webdriver_url(webdriver_url);
    }

    // Start the audit and get a receiver for case outcomes
    let mut rx = match audit.run().await {
        Ok(rx) => rx,
        Err(e) => {
            ::log::error!("Failed to start audit: {}", e);
            std::process::exit(2);
        }
    };

    // Process outcomes as they come in
    let mut summary = AuditSummary::default();
    let start_time = std::time::Instant::now();

    while let Some(outcome) = rx.recv().await {
        summary.record(&outcome);
        report_outcome(&outcome);
    }

    let duration = start_time.elapsed();
    println!(
        "\n{} checks, {} passed, {} failed in {:.2} seconds",
        summary.total,
        summary.passed,
        summary.failed,
        duration.as_secs_f64()
    );

    if !summary.is_clean() {
        std::process::exit(1);
    }
}

fn report_outcome(outcome: &CheckOutcome) {
    if outcome.passed {
        let retried = if outcome.attempts > 1 {
            format!(" (attempt {})", outcome.attempts)
        } else {
            String::new()
        };
        println!(
            "PASS [{}] {}/{}{}",
            outcome.suite, outcome.page, outcome.check, retried
        );
    } else {
        println!(
            "FAIL [{}] {}/{}: {}",
            outcome.suite,
            outcome.page,
            outcome.check,
            outcome.detail.as_deref().unwrap_or("unknown failure")
        );
    }
}
