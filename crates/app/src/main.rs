use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use services::{BankService, QuizSession};

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
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank demos/bank.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path = std::env::var("QUIZ_BANK")
            .ok()
            .map_or_else(|| PathBuf::from("demos/bank.json"), PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    bank_path = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank_path })
    }
}

/// Reads 1-based selections until one is valid; `None` on end of input.
fn prompt_choice(input: &mut impl BufRead, option_count: usize) -> io::Result<Option<usize>> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=option_count).contains(&choice) => return Ok(Some(choice - 1)),
            _ => eprintln!("pick a number between 1 and {option_count}"),
        }
    }
}

fn run_session(session: &mut QuizSession, input: &mut impl BufRead) -> io::Result<()> {
    while !session.is_finished() {
        let Some(question) = session.current_question() else {
            break;
        };

        let number = session.answered_count() + 1;
        let total = session.total_questions();
        println!();
        println!("Question {number}/{total}: {}", question.prompt());
        if let Some(image) = question.theme_image() {
            println!("  [{image}]");
        }
        let options: Vec<String> = question.options().to_vec();
        for (slot, option) in options.iter().enumerate() {
            println!("  {}. {option}", slot + 1);
        }

        let Some(choice) = prompt_choice(input, options.len())? else {
            break;
        };
        session.select_answer(options[choice].clone());
        session.advance();
    }

    Ok(())
}

fn print_summary(session: &QuizSession) {
    println!();
    if !session.is_finished() {
        println!(
            "Quiz abandoned after {} of {} questions.",
            session.answered_count(),
            session.total_questions()
        );
    }

    println!(
        "Score: {}/{} ({}%), {}",
        session.score(),
        session.total_questions(),
        session.score_percentage(),
        session.score_category()
    );
    if let Ok(summary) = session.summary() {
        let elapsed = summary.completed_at() - summary.started_at();
        println!("Completed in {}s.", elapsed.num_seconds());
    }

    let breakdown = session.results_by_theme();
    for group in &breakdown {
        println!();
        println!("Theme {} [{}]", group.theme.id(), group.theme.image());
        for result in &group.results {
            let mark = if result.is_correct { "+" } else { "x" };
            println!(
                "  {mark} {} (you said: {}, answer: {})",
                result.prompt, result.user_answer, result.answer
            );
        }
    }

    // Flat banks have no theme view; list the results directly.
    if breakdown.is_empty() && !session.results().is_empty() {
        println!();
        for result in session.results() {
            let mark = if result.is_correct { "+" } else { "x" };
            println!(
                "  {mark} {} (you said: {}, answer: {})",
                result.prompt, result.user_answer, result.answer
            );
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let bank = BankService::load(&args.bank_path)?;
    let mut session = QuizSession::new(bank);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_session(&mut session, &mut input)?;
    print_summary(&session);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
