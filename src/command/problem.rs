use crate::{
    read::{read_line, read_parse, read_text, read_writer},
    write::{write_output, write_result},
};
use practice_client::{
    api::{ProblemDetail, Session},
    language::Language,
    render::{difficulty_label, test_case_data},
    schema::{ProblemId, Tag},
    workbench::{Command, Workbench},
    LIST_LIMIT,
};
use std::{
    io::{self, Write},
    rc::Rc,
};
use termcolor::{StandardStream, WriteColor};

type Bench = Workbench<Rc<Session>, Rc<Session>>;

/// Resolves a tag typed by the user, by id or case-insensitive name.
fn find_tag(tags: &[Tag], input: &str) -> Option<u64> {
    input
        .parse::<u64>()
        .ok()
        .filter(|id| tags.iter().any(|t| t.id == *id))
        .or_else(|| {
            tags.iter()
                .find(|t| t.name.eq_ignore_ascii_case(input))
                .map(|t| t.id)
        })
}

pub async fn list_tags(stdout: &mut StandardStream, session: &Session) {
    match session.all_tags().await {
        Ok(tags) if tags.is_empty() => write_info!(stdout, "Info", "No tags found"),
        Ok(tags) => {
            for t in tags {
                writeln!(stdout, "{:>5}  {}", t.id, t.name).expect("Failed to write output");
            }
        }
        Err(e) => write_error!(stdout, "Error", "Failed to load tags: {}", e),
    }
}

pub async fn list_problems(stdout: &mut StandardStream, session: &Session) {
    let difficulty = read_line(stdout, b"Difficulty (empty for all): ")
        .trim()
        .to_ascii_lowercase();
    let tag = read_line(stdout, b"Tag (empty for all): ").trim().to_string();
    let query = read_line(stdout, b"Search (empty for all): ");

    let list = if tag.is_empty() {
        let filter = Some(difficulty.as_str()).filter(|d| !d.is_empty());
        session.problems(0, LIST_LIMIT, filter).await
    } else {
        let tags = match session.all_tags().await {
            Ok(v) => v,
            Err(e) => {
                write_error!(stdout, "Error", "Failed to load tags: {}", e);
                return;
            }
        };
        match find_tag(&tags, &tag) {
            Some(id) => session.problems_by_tag(id).await.map(|list| {
                list.into_iter()
                    .filter(|p| {
                        difficulty.is_empty() || p.difficulty.eq_ignore_ascii_case(&difficulty)
                    })
                    .collect::<Vec<_>>()
            }),
            None => {
                write_error!(stdout, "Error", "Unknown tag {}", tag);
                return;
            }
        }
    };
    match list {
        Ok(list) => {
            let mut shown = 0;
            for p in list.iter().filter(|p| p.matches(&query)) {
                writeln!(
                    stdout,
                    "{:>5}  {:<8} {}",
                    p.id,
                    difficulty_label(&p.difficulty),
                    p.title
                )
                .expect("Failed to write output");
                shown += 1;
            }
            if shown == 0 {
                write_info!(stdout, "Info", "No problems found");
            }
        }
        Err(e) => write_error!(
            stdout,
            "Error",
            "Failed to load problems. Please try again later. ({})",
            e
        ),
    }
}

fn write_problem(w: &mut impl Write, detail: &ProblemDetail) -> io::Result<()> {
    let p = &detail.problem;
    writeln!(
        w,
        "{}. {} [{}]\n\n{}",
        p.id,
        p.title,
        difficulty_label(&p.difficulty),
        p.description.trim_end()
    )?;
    for (i, case) in detail.test_cases.iter().enumerate() {
        writeln!(w, "\nExample {}:", i + 1)?;
        writeln!(w, "Input:\n{}", test_case_data(&case.input_data))?;
        writeln!(w, "Output:\n{}", test_case_data(&case.expected_output))?;
        if let Some(e) = &case.explanation {
            writeln!(w, "Explanation: {}", e)?;
        }
    }
    if !detail.constraints.is_empty() {
        writeln!(w, "\nConstraints:")?;
        for c in &detail.constraints {
            writeln!(w, "  • {}", c.description)?;
        }
    }
    if !detail.tags.is_empty() {
        let names: Vec<&str> = detail.tags.iter().map(|t| t.name.as_str()).collect();
        writeln!(w, "\nTopics: {}", names.join(", "))?;
    }
    Ok(())
}
fn show_problem(stdout: &mut StandardStream, detail: &ProblemDetail) {
    write_problem(stdout, detail).expect("Failed to write output");
}

async fn judge(stdout: &mut StandardStream, bench: &Bench, command: Command) {
    let verb = if command == Command::Run {
        "code"
    } else {
        "submission"
    };
    write_progress!(stdout, "Judging", "{}", verb);
    // The error text is already in the output panel.
    let _ = bench.dispatch(command).await;
    write_output(stdout, &bench.output());
}

/// Runs the problem page for one problem. Returns the language last used so
/// the next problem opens in it.
pub async fn problem_loop(
    stdout: &mut StandardStream,
    session: &Rc<Session>,
    language: Language,
) -> Language {
    let id: ProblemId = read_parse(stdout, b"Problem id: ");
    let detail = match session.detail(id).await {
        Ok(v) => v,
        Err(e) => {
            write_error!(
                stdout,
                "Error",
                "Failed to load problem details. Please try again later. ({})",
                e
            );
            return language;
        }
    };
    write_info!(stdout, "Info", "Selected {}. {}", id, detail.problem.title);

    let bench: Bench = Workbench::new(
        session.clone(),
        session.clone(),
        session.credentials().clone(),
        language,
    );
    match bench.open(id).await {
        Ok(_) => write_ok!(
            stdout,
            "Loaded",
            "{} code",
            bench.editor().language().name()
        ),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
    stdout.reset().expect("Failed to reset color");
    loop {
        let prompt = format!("practice-client [{} {}]> ", id, bench.editor().language());
        match read_line(stdout, prompt.as_bytes()).trim() {
            "show" => show_problem(stdout, &detail),
            "code" => {
                writeln!(stdout, "{}", bench.editor().buffer())
                    .expect("Failed to write output");
            }
            "load" => {
                let text = read_text(stdout);
                write_result(
                    stdout,
                    bench.dispatch(Command::Edit(text)).await,
                    "Loaded code into the editor",
                );
            }
            "save" => {
                let mut w = read_writer(stdout);
                match w.write_all(bench.editor().buffer().as_bytes()) {
                    Ok(_) => write_ok!(stdout, "Success", "Written code to file"),
                    Err(e) => write_error!(stdout, "Error", "write file: {}", e),
                }
            }
            "lang" => {
                let target: Language = read_parse(stdout, b"Language: ");
                write_result(
                    stdout,
                    bench.dispatch(Command::SwitchLanguage(target)).await,
                    &format!("Switched to {}", target.name()),
                );
            }
            "run" => judge(stdout, &bench, Command::Run).await,
            "submit" => judge(stdout, &bench, Command::Submit).await,
            "reset" => write_result(
                stdout,
                bench.dispatch(Command::Reset).await,
                "Reset code to the starter template",
            ),
            "output" => write_output(stdout, &bench.output()),
            "unselect" | "exit" => {
                bench.close();
                write_info!(stdout, "Info", "Unselected problem");
                break;
            }
            "" => (),
            unknown => write_error!(stdout, "Error", "problem: Unknown command {}", unknown),
        }
        stdout.reset().expect("Failed to reset color");
    }
    bench.editor().language()
}
