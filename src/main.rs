use std::{env, fs::read_to_string, process::exit, rc::Rc, time::Instant};

use minicc::{
    display_error, lexer::lexer::tokenize, lexer::source::StringSource, parser::parser::parse,
    process::CompileProcess,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.c>", args[0]);
        exit(1);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            exit(1);
        }
    };

    let mut process = CompileProcess::new(file_name, 0);
    let mut reader = StringSource::new(&source, Rc::clone(&process.filename));

    let start = Instant::now();

    process.tokens = match tokenize(&mut reader) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source);
            exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    if let Err(error) = parse(&mut process) {
        display_error(&error, &source);
        exit(1);
    }

    println!("Parsed in {:?}", parse_start.elapsed());
    println!("Total time for front end: {:?}", start.elapsed());

    for warning in &process.warnings {
        println!("Warning: {}", warning);
    }

    println!("Tokens: {}", process.tokens.len());
    println!("Top level nodes: {}", process.nodes.result().len());
}
