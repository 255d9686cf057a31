use annai::prelude::*;
use clap::Parser;
use std::io::{self, Write};
use std::thread;
use tracing_subscriber::EnvFilter;

/// Walk through a funnel definition in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the funnel JSON file
    funnel_path: String,

    /// Optional path to a session config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for landing variant draws (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,
}

/// What the user typed, before it is matched against the active view.
enum Command {
    Quit,
    Restart,
    Goto(String),
    Line(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let funnel = Funnel::from_file(&cli.funnel_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load funnel from '{}': {}",
            cli.funnel_path, e
        ))
    });

    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config from '{}': {}", path, e))
        }),
        None => SessionConfig::default(),
    };
    if cli.seed.is_some() {
        config.variant_seed = cli.seed;
    }

    let renderers = RendererRegistry::builder().build();
    let mut session = Session::builder(funnel).config(config).build();

    println!("--- Annai Interactive Mode ---");
    println!("Commands: :restart, :goto <step>, :quit\n");

    loop {
        match renderers.render(session.view(), session.context()) {
            Ok(text) => println!("{}\n", text),
            Err(e) => exit_with_error(&e.to_string()),
        }

        if let View::Loading { .. } = session.view() {
            thread::sleep(session.config().results_delay());
            session.fetch_results(&MockOutcomeProvider);
            continue;
        }

        let Some(command) = read_command(prompt_text(session.view())) else {
            break;
        };
        let intent = match command {
            Command::Quit => break,
            Command::Restart => Intent::Restart,
            Command::Goto(step_id) => Intent::redirect(&step_id),
            Command::Line(line) => match line_to_intent(&session, &line) {
                Some(intent) => intent,
                None => {
                    println!("Please enter a valid choice.\n");
                    continue;
                }
            },
        };

        if let Err(e) = session.dispatch(intent) {
            println!("{}\n", e);
        }
    }
}

fn prompt_text(view: &View) -> &'static str {
    match view {
        View::Landing { .. } => "Press Enter to continue",
        View::SingleChoice { .. } => "Enter a number",
        View::MultiChoice { .. } => "Enter a number to toggle, or nothing to confirm",
        View::Form { .. } => "Press Enter to fill in the form",
        View::Halted(_) => "Enter a step to jump to, or nothing to quit",
        View::Results { .. } | View::End { .. } | View::Done => {
            "Type :restart to start over, or nothing to quit"
        }
        View::Loading { .. } => "",
    }
}

/// Turns a plain input line into the intent it stands for at the active view.
fn line_to_intent(session: &Session, line: &str) -> Option<Intent> {
    match session.view() {
        View::Landing { .. } => Some(Intent::Continue),
        View::SingleChoice { step, .. } => {
            option_at(&step.options, line).map(|option| Intent::select(&option.id))
        }
        View::MultiChoice { step, .. } => {
            if line.is_empty() {
                Some(Intent::Confirm)
            } else {
                option_at(&step.options, line).map(|option| Intent::toggle(&option.id))
            }
        }
        View::Form { step, .. } => collect_form(step),
        View::Halted(_) if !line.is_empty() => Some(Intent::redirect(line)),
        View::Halted(_) | View::Results { .. } | View::End { .. } | View::Done => {
            if line.is_empty() {
                exit_cleanly()
            }
            None
        }
        View::Loading { .. } => None,
    }
}

/// Resolves a 1-based option number.
fn option_at<'a>(options: &'a [ChoiceOption], line: &str) -> Option<&'a ChoiceOption> {
    let index = line.parse::<usize>().ok()?.checked_sub(1)?;
    options.get(index)
}

fn collect_form(step: &FormStep) -> Option<Intent> {
    let mut values = Vec::with_capacity(step.fields.len());
    for field in &step.fields {
        let marker = if field.required { " *" } else { "" };
        let value = prompt_for_input(&format!("{}{}", field.label, marker))?;
        values.push((field.id.clone(), value));
    }
    Some(Intent::submit(values))
}

fn read_command(prompt: &str) -> Option<Command> {
    let line = prompt_for_input(prompt)?;
    let goto = line.strip_prefix(":goto ").map(|step_id| step_id.trim().to_string());
    Some(match (line.as_str(), goto) {
        (":quit" | ":q", _) => Command::Quit,
        (":restart", _) => Command::Restart,
        (_, Some(step_id)) => Command::Goto(step_id),
        (_, None) => Command::Line(line.clone()),
    })
}

/// Prompts the user and reads a line of input. `None` on end of input.
fn prompt_for_input(prompt_text: &str) -> Option<String> {
    print!("> {}: ", prompt_text);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
}

fn exit_cleanly() -> ! {
    println!("Bye.");
    std::process::exit(0);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
