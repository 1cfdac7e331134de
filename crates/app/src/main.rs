use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    HttpQuestionService, QuestionService, QuestionServiceConfig, QuestionServiceConfigError,
    RetryPolicy,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBaseUrl(QuestionServiceConfigError),
    InvalidAttempts { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBaseUrl(err) => write!(f, "{err}"),
            ArgsError::InvalidAttempts { raw } => write!(f, "invalid --attempts value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<QuestionServiceConfigError> for ArgsError {
    fn from(err: QuestionServiceConfigError) -> Self {
        ArgsError::InvalidBaseUrl(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-url <url>] [--attempts <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url {}", QuestionServiceConfig::DEFAULT_BASE_URL);
    eprintln!("  --attempts {}", RetryPolicy::DEFAULT_MAX_ATTEMPTS);
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_GENERATE_ATTEMPTS, RUST_LOG");
}

struct Args {
    service: QuestionServiceConfig,
    retry: RetryPolicy,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut base_url: Option<String> = None;
        let mut retry = RetryPolicy::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    base_url = Some(require_value(args, "--base-url")?);
                }
                "--attempts" => {
                    let value = require_value(args, "--attempts")?;
                    let parsed: u32 = value
                        .parse()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ArgsError::InvalidAttempts { raw: value.clone() })?;
                    retry = RetryPolicy::new(parsed);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let service = match base_url {
            Some(raw) => QuestionServiceConfig::new(&raw)?,
            None => QuestionServiceConfig::from_env()?,
        };

        Ok(Some(Self { service, retry }))
    }
}

struct DesktopApp {
    question_service: Arc<HttpQuestionService>,
    retry: RetryPolicy,
}

impl UiApp for DesktopApp {
    fn question_service(&self) -> Arc<dyn QuestionService> {
        self.question_service.clone()
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,ui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the environment and defaults still apply.
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    tracing::info!(
        base_url = %args.service.base_url(),
        attempts = args.retry.max_attempts(),
        "starting quiz client"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        question_service: Arc::new(HttpQuestionService::new(args.service)),
        retry: args.retry,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(&mut argv.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn base_url_flag_is_validated() {
        let err = parse(&["--base-url", "not a url at all"]).err().unwrap();
        assert!(matches!(
            err,
            ArgsError::InvalidBaseUrl(QuestionServiceConfigError::InvalidBaseUrl { ref raw })
                if raw == "not a url at all"
        ));

        let args = parse(&["--base-url", "https://quiz.example.com/api", "--attempts", "5"])
            .unwrap()
            .unwrap();
        assert_eq!(
            args.service.endpoint("check-answers"),
            "https://quiz.example.com/api/check-answers"
        );
        assert_eq!(args.retry.max_attempts(), 5);
    }

    #[test]
    fn flag_errors() {
        assert!(matches!(
            parse(&["--base-url"]),
            Err(ArgsError::MissingValue { flag: "--base-url" })
        ));
        assert!(matches!(
            parse(&["--attempts", "0"]),
            Err(ArgsError::InvalidAttempts { .. })
        ));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(parse(&["--help"]), Ok(None)));
    }
}
