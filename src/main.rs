use std::path::Path;
use std::process::ExitCode;

use chirp::ChirpError;
use chirp::cli::{self, App};
use chirp::command::{self, Env};

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let name = argv
        .first()
        .map(Path::new)
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or("chirp")
        .to_string();

    let root = cli::root(&name);
    let mut env = Env::new(&root, App::default());
    match command::run(&mut env, argv.get(1..).unwrap_or_default()) {
        Ok(()) => ExitCode::SUCCESS,
        // Help and usage output has already been written.
        Err(ChirpError::Usage) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {err}");
            if let ChirpError::Api { body, .. } = &err
                && !body.is_empty()
            {
                println!("{body}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
