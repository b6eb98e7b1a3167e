use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use trivia_core::{
    percent, FetchOutcome, PresentedQuestion, QuestionId, QuizSession, ValidationError,
};
use trivia_source::{FetchRequest, QuestionSource};
use trivia_store::{ScoreRepository, StorageAdapter};

use crate::cli::{Commands, PlayArgs};
use crate::config::Settings;
use crate::render;

pub async fn execute<S: StorageAdapter>(
    command: Commands,
    settings: &Settings,
    repository: &mut ScoreRepository<S>,
    source: &dyn QuestionSource,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    run(command, settings, repository, source, &mut input, &mut output).await
}

pub async fn run<S, R, W>(
    command: Commands,
    settings: &Settings,
    repository: &mut ScoreRepository<S>,
    source: &dyn QuestionSource,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    S: StorageAdapter,
    R: BufRead,
    W: Write,
{
    match command {
        Commands::Play(args) => {
            play(args, settings, repository, source, input, output).await?;
        }

        Commands::NewPlayer(args) => {
            repository.storage_mut().clear_current_user()?;
            tracing::info!("Cleared current player");
            play(args, settings, repository, source, input, output).await?;
        }

        Commands::Scores { sort } => {
            let preference = match sort {
                Some(preference) => {
                    repository.set_preference(preference)?;
                    preference
                }
                None => repository.preference(),
            };

            let view = repository.ranked_view(preference);
            write!(output, "{}", render::scoreboard(&view))?;
        }

        Commands::Sort { preference } => {
            repository.set_preference(preference)?;
            writeln!(output, "Scoreboard will be sorted by {}", preference)?;
        }

        Commands::Clear { yes } => {
            let confirmed = yes
                || matches!(
                    prompt(input, output, "Delete all saved scores? [y/N]: ")?,
                    Some(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes")
                );

            if confirmed {
                repository.clear_all()?;
                writeln!(output, "All scores deleted.")?;
            } else {
                writeln!(output, "Nothing deleted.")?;
            }
        }
    }

    Ok(())
}

enum Reply {
    Answer(String),
    Skip,
    Closed,
}

async fn play<S, R, W>(
    args: PlayArgs,
    settings: &Settings,
    repository: &mut ScoreRepository<S>,
    source: &dyn QuestionSource,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    S: StorageAdapter,
    R: BufRead,
    W: Write,
{
    let request = FetchRequest::new(args.amount.unwrap_or(settings.question_amount))
        .with_category(args.category.or(settings.category))
        .with_difficulty(match args.difficulty {
            Some(difficulty) => Some(difficulty),
            None => settings.difficulty()?,
        });

    let mut session = QuizSession::new();
    let ticket = session.begin_fetch();
    writeln!(output, "{}", render::LOADING)?;

    let result = source.fetch(&request).await;
    match session.complete_fetch(ticket, result) {
        FetchOutcome::Loaded(0) => {
            writeln!(output, "No questions were returned. Run `trivia new-player` to try again.")?;
            return Ok(());
        }
        FetchOutcome::Loaded(_) => {}
        FetchOutcome::Failed(message) => {
            writeln!(output, "Could not load questions: {}", message)?;
            writeln!(output, "Run `trivia new-player` to try again.")?;
            return Ok(());
        }
        FetchOutcome::Superseded => return Ok(()),
    }

    let form = session.present(&mut rand::rng());
    let mut answers: HashMap<QuestionId, String> = HashMap::new();

    for question in &form {
        writeln!(output)?;
        match ask(question, input, output)? {
            Reply::Answer(answer) => {
                answers.insert(question.id.clone(), answer);
            }
            Reply::Skip => {}
            Reply::Closed => return abandon(output),
        }
    }

    let prefill = args
        .name
        .or_else(|| repository.storage().load_current_user())
        .unwrap_or_default();
    let Some(mut name) = ask_name(&prefill, input, output)? else {
        return abandon(output);
    };

    let submission = loop {
        match session.submit(&name, &answers) {
            Ok(submission) => break submission,
            Err(err) => {
                writeln!(output, "\n{}", err)?;
                match err {
                    ValidationError::Unanswered { id, .. } => {
                        let Some(question) = form.iter().find(|q| q.id == id) else {
                            return abandon(output);
                        };
                        match ask(question, input, output)? {
                            Reply::Answer(answer) => {
                                answers.insert(id, answer);
                            }
                            Reply::Skip => {}
                            Reply::Closed => return abandon(output),
                        }
                    }
                    ValidationError::EmptyName => match ask_name("", input, output)? {
                        Some(entered) => name = entered,
                        None => return abandon(output),
                    },
                    ValidationError::NoQuestions => return Ok(()),
                }
            }
        }
    };

    repository.storage_mut().save_current_user(&submission.name)?;
    let record = repository.append(
        &submission.name,
        submission.grade.correct,
        submission.grade.total,
    )?;

    writeln!(
        output,
        "\n{} scored {}/{} ({}%)\n",
        record.name,
        record.correct,
        record.total,
        percent(&record)
    )?;
    write!(output, "{}", render::scoreboard(&repository.current_view()))?;

    Ok(())
}

fn abandon<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\nQuiz abandoned, no score recorded.")?;
    Ok(())
}

fn ask<R: BufRead, W: Write>(
    question: &PresentedQuestion,
    input: &mut R,
    output: &mut W,
) -> Result<Reply> {
    write!(output, "{}", render::question(question))?;

    let last = render::option_label(question.options.len().saturating_sub(1));
    loop {
        let message = format!("Answer (A-{}, blank to skip): ", last);
        let Some(line) = prompt(input, output, &message)? else {
            return Ok(Reply::Closed);
        };

        if line.is_empty() {
            return Ok(Reply::Skip);
        }

        match render::parse_option(&line, question.options.len()) {
            Some(index) => return Ok(Reply::Answer(question.options[index].clone())),
            None => writeln!(output, "Please pick one of A-{}.", last)?,
        }
    }
}

fn ask_name<R: BufRead, W: Write>(
    prefill: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>> {
    let message = if prefill.trim().is_empty() {
        "Your name: ".to_string()
    } else {
        format!("Your name [{}]: ", prefill)
    };

    Ok(prompt(input, output, &message)?.map(|entered| {
        if entered.is_empty() {
            prefill.to_string()
        } else {
            entered
        }
    }))
}

/// Print `message` and read one trimmed line. `None` once input is closed.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
