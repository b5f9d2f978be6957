// minijava: tokenize and parse a MiniJava program, then print or browse its syntax tree

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as _;
use crossterm::{
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use minijava::parser::ast::Program;
use minijava::parser::{lexical_errors, tokenize, Parser, Token};
use minijava::printer::AstPrinter;
use minijava::ui::App;

/// Parse a MiniJava source file and print its syntax tree
#[derive(clap::Parser, Debug)]
#[command(name = "minijava", version, about)]
struct Cli {
    /// MiniJava source file
    file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Browse the syntax tree in an interactive viewer instead of printing it
    #[arg(long)]
    view: bool,

    /// Only print the tree and errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable coloured diagnostics
    #[arg(long)]
    no_color: bool,
}

/// Writes progress and errors to stderr
struct Diagnostics {
    color: bool,
    quiet: bool,
}

impl Diagnostics {
    fn progress(&self, message: impl Display) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{}", message.to_string().dark_grey());
        } else {
            eprintln!("{}", message);
        }
    }

    fn error(&self, label: &str, message: impl Display) {
        if self.color {
            eprintln!("{} {}", label.red().bold(), message);
        } else {
            eprintln!("{} {}", label, message);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let diagnostics = Diagnostics {
        color: !cli.no_color && io::stderr().is_tty(),
        quiet: cli.quiet,
    };

    let source = fs::read(&cli.file)
        .with_context(|| format!("Reading {}", cli.file.display()))?;

    if source.is_empty() {
        diagnostics.error("Error:", format!("{} is empty", cli.file.display()));
        std::process::exit(1);
    }

    diagnostics.progress(format!("Tokenizing {}...", cli.file.display()));
    let tokens = tokenize(&source);
    diagnostics.progress(format!("Found {} tokens.", tokens.len()));

    if cli.tokens {
        print_tokens(&tokens);
    }

    for message in lexical_errors(&tokens)
        .into_iter()
        .filter_map(Token::lex_error_message)
    {
        diagnostics.error("Error:", message);
    }

    diagnostics.progress("Parsing...");
    let program = match Parser::new(tokens).parse_program() {
        Ok(program) => program,
        Err(e) => {
            diagnostics.error("Error:", e);
            std::process::exit(1);
        }
    };

    diagnostics.progress(format!(
        "Parsed successfully. Found {} class(es) besides {}.",
        program.classes.len(),
        program.main_class.class_name
    ));

    if cli.view {
        return run_viewer(String::from_utf8_lossy(&source).into_owned(), &program);
    }

    println!("{}", AstPrinter::print_program(&program));
    Ok(())
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{:>4}:{:<4} {:<20} {}",
            token.line(),
            token.column(),
            token.kind.to_string(),
            token.lexeme
        );
    }
}

fn run_viewer(source: String, program: &Program) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, program);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Running the tree viewer")
}
