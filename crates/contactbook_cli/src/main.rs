//! Interactive contact book entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and load the stored book.
//! - Run the read-eval-print loop over stdin/stdout.
//! - Save the book when the loop ends, on `exit` or end of input.

use contactbook_core::service::assistant::GREETING;
use contactbook_core::{
    init_logging, load_address_book, logging_status, save_address_book, AppConfig, Assistant,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const PROMPT: &str = "Enter a command: ";

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    let book = match load_address_book(&config.db_path) {
        Ok(book) => book,
        Err(err) => {
            eprintln!(
                "failed to load contacts from `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    if let Some((level, log_dir)) = logging_status() {
        info!(
            "event=session_start module=cli status=ok version={} log_level={} log_dir={}",
            contactbook_core::core_version(),
            level,
            log_dir.display()
        );
    }
    let mut assistant = Assistant::new(book);
    if let Err(err) = run_loop(&mut assistant) {
        eprintln!("input error: {err}");
    }

    let book = assistant.into_book();
    match save_address_book(&book, &config.db_path) {
        Ok(()) => {
            info!("event=session_end module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!(
                "failed to save contacts to `{}`: {err}",
                config.db_path.display()
            );
            ExitCode::FAILURE
        }
    }
}

fn run_loop(assistant: &mut Assistant) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    writeln!(stdout, "{GREETING}")?;
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let reply = assistant.handle_line(&line);
        writeln!(stdout, "{}", reply.message)?;
        if reply.exit {
            return Ok(());
        }
    }
}
