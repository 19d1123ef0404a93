use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

use quiz_core::Clock;
use quiz_core::model::QuestionBank;
use services::{QuizIntent, QuizLoopService, QuizNotice, SaveOutcome, SessionError, SessionPhase, SessionView};
use storage::FileRecordStore;
use storage::json::load_question_bank;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    bank_path: PathBuf,
    records_dir: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>] [--records-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank technician.json");
    eprintln!("  --records-dir incorrect_answers");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_RECORDS_DIR");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path = std::env::var("QUIZ_BANK")
            .map_or_else(|_| PathBuf::from("technician.json"), PathBuf::from);
        let mut records_dir = std::env::var("QUIZ_RECORDS_DIR")
            .map_or_else(|_| PathBuf::from("incorrect_answers"), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    bank_path = PathBuf::from(require_value(args, "--bank")?);
                }
                "--records-dir" => {
                    records_dir = PathBuf::from(require_value(args, "--records-dir")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank_path,
            records_dir,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // A load failure is reported and leaves the bank empty: the quiz then
    // refuses to start rather than crashing.
    let bank = match load_question_bank(&args.bank_path).await {
        Ok(bank) => bank,
        Err(err) => {
            eprintln!("failed to load question bank: {err}");
            QuestionBank::empty()
        }
    };

    let records = FileRecordStore::create(&args.records_dir).await?;
    let (service, notices) =
        QuizLoopService::new(Arc::new(bank), Clock::default_clock(), Arc::new(records));

    run_loop(&service, notices).await?;
    Ok(())
}

async fn run_loop(
    service: &QuizLoopService,
    mut notices: UnboundedReceiver<QuizNotice>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("ARRL Technician License Flashcards");
    println!("Type 'start' to begin, 'quit' to leave.");

    loop {
        drain_notices(&mut notices);

        let view = service.view()?;
        render(&view);

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if view.phase == SessionPhase::NotStarted {
            match input {
                "" | "start" => match service.start() {
                    Ok(_) => {}
                    Err(SessionError::NotReady) => {
                        println!("Questions are not loaded; cannot start.");
                    }
                    Err(err) => return Err(err.into()),
                },
                "quit" => break,
                other => println!("Unknown command: {other}"),
            }
            continue;
        }

        let Some(intent) = QuizIntent::parse(input, view.feedback_pending) else {
            if !input.is_empty() {
                println!("Unknown command: {input}");
            }
            continue;
        };

        match intent {
            QuizIntent::Select(letter) => {
                if let Some(feedback) = service.select(letter)? {
                    if feedback.is_correct {
                        println!("Correct!");
                    } else {
                        println!("Wrong. Correct answer: {}", feedback.correct);
                    }
                    // Mirror the feedback window before showing the next card.
                    tokio::time::sleep(feedback.delay).await;
                }
            }
            QuizIntent::Skip => {
                service.skip()?;
            }
            QuizIntent::Review => {
                service.enter_review()?;
            }
            QuizIntent::Resume => {
                service.resume()?;
            }
            QuizIntent::Restart => {
                service.restart()?;
            }
            QuizIntent::Exit => {
                service.exit()?;
            }
            QuizIntent::Save => match service.save().await {
                Ok(SaveOutcome::Saved { session_id }) => {
                    println!("Incorrect answers saved for session {session_id}.");
                }
                Ok(SaveOutcome::NothingToSave) => {
                    println!("No incorrect answers to save!");
                }
                Err(err) => {
                    println!("Failed to save incorrect answers: {err}. Please try again.");
                }
            },
        }
    }

    Ok(())
}

fn drain_notices(notices: &mut UnboundedReceiver<QuizNotice>) {
    while let Ok(notice) = notices.try_recv() {
        match notice {
            QuizNotice::RecordSaved { session_id } => {
                println!("Session {session_id} record saved.");
            }
            QuizNotice::SaveFailed { session_id, reason } => {
                println!("Failed to save record for session {session_id}: {reason}");
            }
        }
    }
}

fn render(view: &SessionView) {
    match view.phase {
        SessionPhase::NotStarted => {
            println!();
            println!("[start] begin a session   [quit] leave");
        }
        SessionPhase::Active => {
            println!();
            println!("Session: {}", view.session_id);
            println!(
                "Score: {} / {} ({}%)   Questions remaining: {}",
                view.score.correct, view.score.total, view.score.percentage, view.remaining
            );
            if let Some(question) = &view.question {
                println!(
                    "Question {} of {}   {}",
                    question.display_id, question.total_questions, question.number
                );
                println!("{}", question.prompt);
                for option in &question.options {
                    println!("  {}. {}", option.letter, option.text);
                }
            }
            println!("[a-d] answer  [skip] [review] [restart] [exit] [save]");
        }
        SessionPhase::Reviewing => {
            println!();
            println!("Incorrect Answers Review");
            for item in &view.review {
                println!();
                println!("Question {}", item.question_id);
                println!("{}", item.prompt);
                println!(
                    "  Selected: {}. {}",
                    item.selected,
                    item.option_text(item.selected).unwrap_or_default()
                );
                println!(
                    "  Correct:  {}. {}",
                    item.correct,
                    item.option_text(item.correct).unwrap_or_default()
                );
            }
            println!();
            println!("[resume] [restart] [exit] [save]");
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
